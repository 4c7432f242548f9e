//! ATmega32A board support.
//!
//! | Signal         | Pin      |
//! |----------------|----------|
//! | BCD digit bus  | PC0..PC3 |
//! | Digit enables  | PA0..PA5 |
//! | Reset button   | PD2/INT0 |
//! | Pause button   | PD3/INT1 |
//! | Resume button  | PB2/INT2 |
//! | Serial TX      | PD1      |

use crate::{
    display::{Display, PinBus},
    hal,
};
use hal::port::{Dynamic, Pin, mode::Output};

pub use hal::clock::Clock;

pub mod exint;
pub mod timer;
#[cfg(feature = "serial-report")]
pub mod usart;

/// Board clock rate, internal RC oscillator with CKSEL fuses set for 8 MHz.
pub type BoardClock = hal::clock::MHz8;

/// Delay implementation for the board.
pub type Delay = hal::delay::Delay<BoardClock>;

/// Output pin with the port erased so pins of a bus fit in one array.
pub type BusPin = Pin<Output, Dynamic>;

/// BCD bus into the 7447 decoder.
pub type DigitBus = PinBus<BusPin, 4>;

/// One enable line per 7-segment digit.
pub type EnableBus = PinBus<BusPin, { crate::display::POSITIONS as usize }>;

pub type BoardDisplay = Display<DigitBus, EnableBus, Delay>;
