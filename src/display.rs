//! Multiplexed 7-segment display.
//!
//! Six digits share one BCD bus into a 7447 decoder. Each digit has its own
//! enable line and only one is lit at a time; the main loop refreshes them
//! fast enough for the eye to see all six at once.

use embedded_hal::{delay::DelayNs, digital::StatefulOutputPin};

use crate::time::ElapsedTime;

/// Time the digit bus is held for each display position.
pub const SETTLE_US: u32 = 10;

/// Number of display positions on the enable bus.
pub const POSITIONS: u8 = 6;

/// Parallel output bus.
pub trait Bus {
    type Error;

    /// Current output value.
    fn read(&mut self) -> Result<u8, Self::Error>;

    /// Drive `value` on the bus. Bits above the bus width are ignored.
    fn write(&mut self, value: u8) -> Result<(), Self::Error>;
}

/// Bus made of individual output pins, bit `i` drives `pins[i]`.
pub struct PinBus<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> PinBus<P, N>
where
    P: StatefulOutputPin,
{
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P, const N: usize> Bus for PinBus<P, N>
where
    P: StatefulOutputPin,
{
    type Error = P::Error;

    fn read(&mut self) -> Result<u8, Self::Error> {
        let mut value = 0;
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            if pin.is_set_high()? {
                value |= 1 << bit;
            }
        }
        Ok(value)
    }

    fn write(&mut self, value: u8) -> Result<(), Self::Error> {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            if value & (1 << bit) != 0 {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        Ok(())
    }
}

/// Time field shown on a pair of display positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Seconds,
    Minutes,
    Hours,
}

impl Field {
    /// Position of the ones digit, the tens digit is the next one.
    #[must_use]
    pub const fn position(self) -> u8 {
        match self {
            Field::Seconds => 0,
            Field::Minutes => 2,
            Field::Hours => 4,
        }
    }

    /// Enable bus bits owned by the field.
    #[must_use]
    pub const fn mask(self) -> u8 {
        0b11 << self.position()
    }
}

/// Display driver.
pub struct Display<D, E, T> {
    digit: D,
    enable: E,
    delay: T,
}

impl<D, E, T> Display<D, E, T>
where
    D: Bus,
    E: Bus<Error = D::Error>,
    T: DelayNs,
{
    pub fn new(digit: D, enable: E, delay: T) -> Self {
        Self {
            digit,
            enable,
            delay,
        }
    }

    pub fn release(self) -> (D, E, T) {
        (self.digit, self.enable, self.delay)
    }

    /// Show `value` as two digits on the positions of `field`.
    ///
    /// Only the enable bits of `field` are changed, and they are all cleared
    /// again on return.
    pub fn show(&mut self, field: Field, value: u8) -> Result<(), D::Error> {
        let position = field.position();
        self.light(field, 1 << position, value % 10)?;
        self.light(field, 1 << (position + 1), value / 10)?;
        self.select(field, 0)
    }

    /// Show all three fields of `time`.
    pub fn refresh(&mut self, time: &ElapsedTime) -> Result<(), D::Error> {
        self.show(Field::Seconds, time.seconds)?;
        self.show(Field::Minutes, time.minutes)?;
        self.show(Field::Hours, time.hours)
    }

    fn light(&mut self, field: Field, selected: u8, digit: u8) -> Result<(), D::Error> {
        self.select(field, selected)?;
        self.digit.write(digit & 0x0F)?;
        self.delay.delay_us(SETTLE_US);
        Ok(())
    }

    fn select(&mut self, field: Field, selected: u8) -> Result<(), D::Error> {
        let mask = field.mask();
        let enabled = self.enable.read()?;
        self.enable.write((enabled & !mask) | (selected & mask))
    }
}
