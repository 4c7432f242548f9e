#![no_std]

pub mod control;
pub mod display;
pub mod report;
pub mod tick;
pub mod time;

#[cfg(feature = "firmware")]
pub mod board;

#[cfg(feature = "firmware")]
pub use atmega_hal as hal;

pub use control::Control;
pub use display::{Display, Field};
pub use time::{ElapsedTime, RunState, Stopwatch};
