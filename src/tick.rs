//! Periodic tick source.
//!
//! The tick is produced by a 16-bit timer running in CTC mode: the counter is
//! cleared when it matches the compare value, which happens once every
//! `compare + 1` prescaled clock cycles.

/// Clock divider in front of the timer counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prescaler {
    Direct,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// All dividers, smallest first.
    pub const ALL: [Prescaler; 5] = [
        Prescaler::Direct,
        Prescaler::Div8,
        Prescaler::Div64,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    #[must_use]
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }

    /// Value of the timer's `CS` clock select field for this divider.
    ///
    /// Zero in that field disconnects the clock and stops the timer.
    #[must_use]
    pub const fn clock_select(self) -> u8 {
        match self {
            Prescaler::Direct => 0b001,
            Prescaler::Div8 => 0b010,
            Prescaler::Div64 => 0b011,
            Prescaler::Div256 => 0b100,
            Prescaler::Div1024 => 0b101,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickConfigError {
    /// The period is zero or too long for any prescaler.
    PeriodOutOfRange,
}

/// Timer settings for one tick period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickConfig {
    pub prescaler: Prescaler,
    pub compare: u16,
}

impl TickConfig {
    /// Find settings for `period_ms` with a timer clocked at `clock_hz`.
    ///
    /// The smallest prescaler whose compare value fits in 16 bits is chosen,
    /// it gives the finest resolution.
    pub const fn for_period(clock_hz: u32, period_ms: u32) -> Result<Self, TickConfigError> {
        let mut i = 0;
        while i < Prescaler::ALL.len() {
            let prescaler = Prescaler::ALL[i];
            let counts = (clock_hz as u64 * period_ms as u64)
                / (prescaler.divisor() as u64 * 1000);
            if counts >= 1 && counts <= u16::MAX as u64 + 1 {
                return Ok(Self {
                    prescaler,
                    compare: (counts - 1) as u16,
                });
            }
            i += 1;
        }
        Err(TickConfigError::PeriodOutOfRange)
    }

    /// Actual tick period in microseconds, `None` for a zero clock.
    #[must_use]
    pub const fn period_us(&self, clock_hz: u32) -> Option<u64> {
        if clock_hz == 0 {
            return None;
        }
        let counts = (self.compare as u64 + 1) * self.prescaler.divisor() as u64;
        Some(counts * 1_000_000 / clock_hz as u64)
    }
}

/// A timer that produces ticks while its clock input is enabled.
pub trait TickSource {
    /// Connect the clock input. Counting continues from the current counter value.
    fn start(&mut self);

    /// Disconnect the clock input.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_second_at_one_megahertz() {
        let config = TickConfig::for_period(1_000_000, 1000).unwrap();
        assert_eq!(config.prescaler, Prescaler::Div64);
        assert_eq!(config.compare, 15624);
        assert_eq!(config.period_us(1_000_000), Some(1_000_000));
    }

    #[test]
    fn one_second_at_sixteen_megahertz() {
        let config = TickConfig::for_period(16_000_000, 1000).unwrap();
        assert_eq!(config.prescaler, Prescaler::Div256);
        assert_eq!(config.compare, 62499);
    }

    #[test]
    fn short_period_uses_direct_clock() {
        let config = TickConfig::for_period(1_000_000, 1).unwrap();
        assert_eq!(config.prescaler, Prescaler::Direct);
        assert_eq!(config.compare, 999);
    }

    #[test]
    fn rejects_unreachable_periods() {
        assert_eq!(
            TickConfig::for_period(1_000_000, 0),
            Err(TickConfigError::PeriodOutOfRange)
        );
        // 1 MHz / 1024 overflows 16 bits after about 67 seconds.
        assert_eq!(
            TickConfig::for_period(1_000_000, 120_000),
            Err(TickConfigError::PeriodOutOfRange)
        );
    }

    #[test]
    fn period_needs_a_clock() {
        let config = TickConfig::for_period(8_000_000, 1000).unwrap();
        assert_eq!(config.period_us(8_000_000), Some(1_000_000));
        assert_eq!(config.period_us(0), None);
    }

    #[test]
    fn clock_select_values() {
        let selects = Prescaler::ALL.map(Prescaler::clock_select);
        assert_eq!(selects, [1, 2, 3, 4, 5]);
        // Zero is reserved for a stopped timer.
        assert!(!selects.contains(&0));
    }

    #[test]
    fn usable_in_const_context() {
        const CONFIG: TickConfig = match TickConfig::for_period(8_000_000, 1000) {
            Ok(c) => c,
            Err(_) => panic!(),
        };
        assert_eq!(CONFIG.prescaler, Prescaler::Div256);
        assert_eq!(CONFIG.compare, 31249);
    }
}
