use crate::{
    hal,
    tick::{Prescaler, TickConfig, TickSource},
};

/// A timer using `TC1` peripheral.
///
/// Triggers `TIMER1_COMPA` interrupt.
pub struct Timer {
    p: hal::pac::TC1,
    prescaler: Prescaler,
}

impl Timer {
    /// Create a new timer instance running with `config`.
    pub fn new(p: hal::pac::TC1, config: TickConfig) -> Self {
        // CTC mode with OCR1A as top, counter starts from zero.
        p.tccr1a.reset();
        p.tccr1b.write(|w| w.wgm1().bits(0b01));
        p.tcnt1.write(|w| w.bits(0));
        p.ocr1a.write(|w| w.bits(config.compare));
        // Compare match A interrupt enable.
        p.timsk.modify(|_, w| w.ocie1a().set_bit());

        let mut timer = Self {
            p,
            prescaler: config.prescaler,
        };
        timer.start();
        timer
    }

    /// Acknowledge a compare match.
    pub fn clear_match(&self) {
        // Flags are cleared by writing a one.
        self.p.tifr.write(|w| w.ocf1a().set_bit());
    }
}

impl TickSource for Timer {
    fn start(&mut self) {
        // CS12:0 = 1..5 selects clk/1, /8, /64, /256 or /1024.
        let select = self.prescaler.clock_select();
        self.p.tccr1b.modify(|_, w| w.cs1().bits(select));
    }

    fn stop(&mut self) {
        // CS12:0 = 0, no clock source (timer stopped).
        self.p.tccr1b.modify(|_, w| w.cs1().val_0x00());
    }

    fn is_running(&self) -> bool {
        !self.p.tccr1b.read().cs1().is_val_0x00()
    }
}
