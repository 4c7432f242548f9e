use nano_fmt::NanoWrite;

use crate::board::BoardClock;
use crate::hal::port::{self, PD0, PD1};

type Baudrate = avr_hal_generic::usart::Baudrate<BoardClock>;

/// Transmit-only wrapper around USART used for the serial report.
pub struct Usart {
    p: crate::hal::pac::USART,
}

impl Usart {
    /// Create new instance from raw hardware, 8N1 frames at `baudrate`.
    #[must_use]
    pub fn new<IMODE: port::mode::InputMode>(
        p: crate::hal::pac::USART,
        _rx: port::Pin<port::mode::Input<IMODE>, PD0>,
        _tx: port::Pin<port::mode::Output, PD1>,
        baudrate: u32,
    ) -> Self {
        let baudrate = Baudrate::new(baudrate);
        // UBRRH shares its address with UCSRC, URSEL (bit 7) must stay clear.
        p.ubrrh.write(|w| w.bits(((baudrate.ubrr >> 8) as u8) & 0x0F));
        p.ubrrl.write(|w| w.bits((baudrate.ubrr & 0xFF) as u8));
        p.ucsra.write(|w| w.u2x().bit(baudrate.u2x));

        // Only the transmitter is used.
        p.ucsrb.write(|w| w.txen().set_bit());

        Self { p }
    }
}

impl NanoWrite for Usart {
    fn write_byte(&mut self, b: u8) {
        while self.p.ucsra.read().udre().bit_is_clear() {}

        self.p.udr.write(|w| w.bits(b));
    }
}
