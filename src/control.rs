//! Push button controls and their external interrupt lines.

use crate::{tick::TickSource, time::Stopwatch};

/// Signal condition that raises an external interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    LowLevel,
    AnyChange,
    Falling,
    Rising,
}

/// How the button input is biased.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    /// Internal pull-up enabled, button connects to ground.
    InternalUp,
    /// Pull-down resistor on the board, button connects to supply.
    ExternalDown,
}

/// Register holding the sense control bits of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SenseRegister {
    Mcucr,
    Mcucsr,
}

/// Bits to update in a sense control register: `(r & !mask) | bits`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SenseControl {
    pub register: SenseRegister,
    pub mask: u8,
    pub bits: u8,
}

impl SenseControl {
    #[must_use]
    pub const fn apply(&self, value: u8) -> u8 {
        (value & !self.mask) | self.bits
    }

    /// The sense bits shifted down to bit 0, as written to the `ISCn` field.
    #[must_use]
    pub const fn field(&self) -> u8 {
        (self.bits & self.mask) >> self.mask.trailing_zeros()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeConfigError {
    /// The line can not detect this condition.
    Unsupported(ExtInt, Edge),
}

/// External interrupt line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtInt {
    Int0,
    Int1,
    Int2,
}

impl ExtInt {
    /// Bit in `GICR` enabling the line.
    #[must_use]
    pub const fn enable_mask(self) -> u8 {
        match self {
            ExtInt::Int0 => 1 << 6,
            ExtInt::Int1 => 1 << 7,
            ExtInt::Int2 => 1 << 5,
        }
    }

    /// Bit in `GIFR` holding the pending flag of the line.
    /// Writing a one clears it.
    #[must_use]
    pub const fn flag_mask(self) -> u8 {
        self.enable_mask()
    }

    /// Sense control bits selecting `edge`.
    ///
    /// INT0 and INT1 use two bits each in `MCUCR`. INT2 is asynchronous and
    /// only has one bit in `MCUCSR`, so it can only detect edges.
    pub const fn sense_control(self, edge: Edge) -> Result<SenseControl, EdgeConfigError> {
        let isc = match edge {
            Edge::LowLevel => 0b00,
            Edge::AnyChange => 0b01,
            Edge::Falling => 0b10,
            Edge::Rising => 0b11,
        };
        match self {
            ExtInt::Int0 => Ok(SenseControl {
                register: SenseRegister::Mcucr,
                mask: 0b11,
                bits: isc,
            }),
            ExtInt::Int1 => Ok(SenseControl {
                register: SenseRegister::Mcucr,
                mask: 0b11 << 2,
                bits: isc << 2,
            }),
            ExtInt::Int2 => match edge {
                Edge::Falling => Ok(SenseControl {
                    register: SenseRegister::Mcucsr,
                    mask: 1 << 6,
                    bits: 0,
                }),
                Edge::Rising => Ok(SenseControl {
                    register: SenseRegister::Mcucsr,
                    mask: 1 << 6,
                    bits: 1 << 6,
                }),
                Edge::LowLevel | Edge::AnyChange => {
                    Err(EdgeConfigError::Unsupported(self, edge))
                }
            },
        }
    }
}

/// Wiring of one button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub line: ExtInt,
    pub edge: Edge,
    pub pull: Pull,
}

/// Stopwatch button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Reset,
    Pause,
    Resume,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Reset, Control::Pause, Control::Resume];

    #[must_use]
    pub const fn binding(self) -> Binding {
        match self {
            Control::Reset => Binding {
                line: ExtInt::Int0,
                edge: Edge::Falling,
                pull: Pull::InternalUp,
            },
            Control::Pause => Binding {
                line: ExtInt::Int1,
                edge: Edge::Rising,
                pull: Pull::ExternalDown,
            },
            Control::Resume => Binding {
                line: ExtInt::Int2,
                edge: Edge::Falling,
                pull: Pull::InternalUp,
            },
        }
    }

    /// Button handled by interrupt `line`.
    #[must_use]
    pub const fn for_line(line: ExtInt) -> Control {
        match line {
            ExtInt::Int0 => Control::Reset,
            ExtInt::Int1 => Control::Pause,
            ExtInt::Int2 => Control::Resume,
        }
    }

    /// Perform the button's action on the stopwatch and its tick source.
    ///
    /// Every action is idempotent.
    pub fn apply<T: TickSource>(self, stopwatch: &mut Stopwatch, ticks: &mut T) {
        match self {
            Control::Reset => stopwatch.reset(),
            Control::Pause => {
                ticks.stop();
                stopwatch.pause();
            }
            Control::Resume => {
                stopwatch.resume();
                ticks.start();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{ElapsedTime, RunState};

    #[derive(Default)]
    struct MockTimer {
        running: bool,
        starts: u8,
        stops: u8,
    }

    impl TickSource for MockTimer {
        fn start(&mut self) {
            self.running = true;
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.running = false;
            self.stops += 1;
        }

        fn is_running(&self) -> bool {
            self.running
        }
    }

    #[test]
    fn buttons_use_distinct_lines() {
        assert_eq!(Control::Reset.binding().line, ExtInt::Int0);
        assert_eq!(Control::Pause.binding().line, ExtInt::Int1);
        assert_eq!(Control::Resume.binding().line, ExtInt::Int2);
        for control in Control::ALL {
            assert_eq!(Control::for_line(control.binding().line), control);
        }
    }

    #[test]
    fn reset_and_pause_use_opposite_edges() {
        assert_eq!(Control::Reset.binding().edge, Edge::Falling);
        assert_eq!(Control::Pause.binding().edge, Edge::Rising);
        assert_eq!(Control::Pause.binding().pull, Pull::ExternalDown);
    }

    #[test]
    fn every_binding_is_configurable() {
        for control in Control::ALL {
            let binding = control.binding();
            assert!(binding.line.sense_control(binding.edge).is_ok());
        }
    }

    #[test]
    fn int0_and_int1_sense_bits() {
        let falling = ExtInt::Int0.sense_control(Edge::Falling).unwrap();
        assert_eq!(falling.register, SenseRegister::Mcucr);
        assert_eq!(falling.apply(0xFF), 0b1111_1110);
        assert_eq!(falling.apply(0x00), 0b0000_0010);

        let rising = ExtInt::Int1.sense_control(Edge::Rising).unwrap();
        assert_eq!(rising.apply(0x00), 0b0000_1100);
        // INT0 bits are left alone.
        assert_eq!(rising.apply(0b0000_0010), 0b0000_1110);

        let any = ExtInt::Int1.sense_control(Edge::AnyChange).unwrap();
        assert_eq!(any.apply(0xFF), 0b1111_0111);
    }

    #[test]
    fn sense_field_values() {
        let field = |line: ExtInt, edge| line.sense_control(edge).unwrap().field();

        assert_eq!(field(ExtInt::Int0, Edge::LowLevel), 0b00);
        assert_eq!(field(ExtInt::Int0, Edge::Falling), 0b10);
        assert_eq!(field(ExtInt::Int1, Edge::AnyChange), 0b01);
        assert_eq!(field(ExtInt::Int1, Edge::Rising), 0b11);
        assert_eq!(field(ExtInt::Int2, Edge::Falling), 0);
        assert_eq!(field(ExtInt::Int2, Edge::Rising), 1);
    }

    #[test]
    fn int2_only_detects_edges() {
        let falling = ExtInt::Int2.sense_control(Edge::Falling).unwrap();
        assert_eq!(falling.register, SenseRegister::Mcucsr);
        assert_eq!(falling.apply(0xFF), 0b1011_1111);

        let rising = ExtInt::Int2.sense_control(Edge::Rising).unwrap();
        assert_eq!(rising.apply(0x00), 0b0100_0000);

        assert_eq!(
            ExtInt::Int2.sense_control(Edge::LowLevel),
            Err(EdgeConfigError::Unsupported(ExtInt::Int2, Edge::LowLevel))
        );
        assert_eq!(
            ExtInt::Int2.sense_control(Edge::AnyChange),
            Err(EdgeConfigError::Unsupported(ExtInt::Int2, Edge::AnyChange))
        );
    }

    #[test]
    fn enable_bits_do_not_overlap() {
        let all =
            ExtInt::Int0.enable_mask() | ExtInt::Int1.enable_mask() | ExtInt::Int2.enable_mask();
        assert_eq!(all, 0b1110_0000);
        assert_eq!(all.count_ones(), 3);
    }

    #[test]
    fn pause_twice_is_pause_once() {
        let mut sw = Stopwatch::new();
        let mut timer = MockTimer {
            running: true,
            ..Default::default()
        };

        Control::Pause.apply(&mut sw, &mut timer);
        let once = (sw, timer.running);
        Control::Pause.apply(&mut sw, &mut timer);

        assert_eq!((sw, timer.running), once);
        assert_eq!(sw.run_state(), RunState::Paused);
        assert!(!timer.is_running());
        assert_eq!(timer.stops, 2);
    }

    #[test]
    fn resume_restarts_timer() {
        let mut sw = Stopwatch::new();
        let mut timer = MockTimer::default();

        Control::Pause.apply(&mut sw, &mut timer);
        Control::Resume.apply(&mut sw, &mut timer);
        Control::Resume.apply(&mut sw, &mut timer);

        assert!(sw.is_running());
        assert!(timer.is_running());
        assert_eq!(timer.starts, 2);
    }

    #[test]
    fn reset_does_not_touch_timer() {
        let mut sw = Stopwatch::new();
        let mut timer = MockTimer {
            running: true,
            ..Default::default()
        };
        for _ in 0..3 {
            sw.tick();
        }

        Control::Reset.apply(&mut sw, &mut timer);
        Control::Reset.apply(&mut sw, &mut timer);

        assert_eq!(sw.time(), ElapsedTime::ZERO);
        assert!(timer.is_running());
        assert_eq!((timer.starts, timer.stops), (0, 0));
    }
}
