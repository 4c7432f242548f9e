/// Seconds and minutes roll over at this value.
pub const MINUTE_MODULUS: u8 = 60;

/// Hours roll over at this value.
///
/// Note that this is 60 and not 24: the stopwatch counts up to 59:59:59.
pub const HOUR_MODULUS: u8 = 60;

/// Time elapsed since the last reset.
///
/// Fields are only bounded after [`ElapsedTime::normalize`] has been applied,
/// the tick interrupt may push `seconds` to 60 before the main loop sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElapsedTime {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
}

impl ElapsedTime {
    pub const ZERO: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            seconds,
            minutes,
            hours,
        }
    }

    /// Propagate carries from seconds to minutes to hours.
    ///
    /// At most one carry per field is performed, which is enough as long as
    /// this is called at least once per tick. Calling it repeatedly converges
    /// to a bounded value from any state.
    pub fn normalize(&mut self) {
        if self.seconds >= MINUTE_MODULUS {
            self.seconds -= MINUTE_MODULUS;
            self.minutes = self.minutes.saturating_add(1);
        }
        if self.minutes >= MINUTE_MODULUS {
            self.minutes -= MINUTE_MODULUS;
            self.hours = self.hours.saturating_add(1);
        }
        if self.hours >= HOUR_MODULUS {
            self.hours -= HOUR_MODULUS;
        }
    }

    /// Returns `true` if every field is below its modulus.
    #[must_use]
    pub const fn is_normalized(&self) -> bool {
        self.seconds < MINUTE_MODULUS
            && self.minutes < MINUTE_MODULUS
            && self.hours < HOUR_MODULUS
    }
}

/// Whether ticks are being counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RunState {
    Running,
    Paused,
}

/// Stopwatch state shared between the interrupt handlers and the main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stopwatch {
    time: ElapsedTime,
    run_state: RunState,
}

impl Stopwatch {
    /// A running stopwatch at zero.
    pub const fn new() -> Self {
        Self {
            time: ElapsedTime::ZERO,
            run_state: RunState::Running,
        }
    }

    #[must_use]
    pub const fn time(&self) -> ElapsedTime {
        self.time
    }

    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.run_state, RunState::Running)
    }

    /// Count one timer period. Ignored while paused.
    pub fn tick(&mut self) {
        if self.is_running() {
            self.time.seconds = self.time.seconds.saturating_add(1);
        }
    }

    /// Clear all counters. The run state is left alone.
    pub fn reset(&mut self) {
        self.time = ElapsedTime::ZERO;
    }

    pub fn pause(&mut self) {
        self.run_state = RunState::Paused;
    }

    pub fn resume(&mut self) {
        self.run_state = RunState::Running;
    }

    /// Apply carry propagation and return the resulting time.
    pub fn normalize(&mut self) -> ElapsedTime {
        self.time.normalize();
        self.time
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
