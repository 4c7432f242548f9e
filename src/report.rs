use nano_fmt::{NanoDisplay, NanoWrite, ZeroPad};

use crate::time::ElapsedTime;

/// Serial report line for the elapsed time, `HH:MM:SS\r\n`.
#[derive(Clone, Copy)]
pub struct Report(pub ElapsedTime);

impl NanoDisplay for Report {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        let time = self.0;
        ZeroPad::<u8, 2>(time.hours).fmt(f);
        f.write_byte(b':');
        ZeroPad::<u8, 2>(time.minutes).fmt(f);
        f.write_byte(b':');
        ZeroPad::<u8, 2>(time.seconds).fmt(f);
        "\r\n".fmt(f);
    }
}

/// Sends a report whenever the time differs from the last one sent.
pub struct Reporter {
    last: Option<ElapsedTime>,
}

impl Reporter {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Write a report for `time` to `w` unless it was already reported.
    /// Returns `true` if something was written.
    pub fn update<W: NanoWrite>(&mut self, time: ElapsedTime, w: &mut W) -> bool {
        if self.last == Some(time) {
            return false;
        }
        self.last = Some(time);
        Report(time).fmt(w);
        true
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
