use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Working,
    OnBreak { remaining: Duration },
}

/// Alternating work and break windows.
///
/// The clock is passed in so the schedule can be driven by tests.
#[derive(Debug, Clone)]
pub struct BreakSchedule {
    work: Duration,
    rest: Duration,
    window_start: DateTime<Utc>,
    on_break: bool,
}

impl BreakSchedule {
    pub fn new(label_minutes: u32, break_minutes: u32, now: DateTime<Utc>) -> Result<Self> {
        if label_minutes < 1 {
            return Err(Error::InvalidBreaks(format!(
                "label minutes should be >= 1, got {}",
                label_minutes
            )));
        }
        if break_minutes < 1 {
            return Err(Error::InvalidBreaks(format!(
                "break minutes should be >= 1, got {}",
                break_minutes
            )));
        }

        Ok(Self {
            work: Duration::minutes(i64::from(label_minutes)),
            rest: Duration::minutes(i64::from(break_minutes)),
            window_start: now,
            on_break: false,
        })
    }

    /// Both values or neither; returns `None` when breaks are disabled.
    pub fn from_options(
        label_minutes: Option<u32>,
        break_minutes: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Option<Self>> {
        match (label_minutes, break_minutes) {
            (None, None) => Ok(None),
            (Some(work), Some(rest)) => Self::new(work, rest, now).map(Some),
            (Some(_), None) => Err(Error::InvalidBreaks(
                "label minutes set, but break minutes missing".to_string(),
            )),
            (None, Some(_)) => Err(Error::InvalidBreaks(
                "break minutes set, but label minutes missing".to_string(),
            )),
        }
    }

    /// Advance the schedule to `now` and report the current mode.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Mode {
        let limit = if self.on_break { self.rest } else { self.work };
        if now - self.window_start >= limit {
            self.on_break = !self.on_break;
            self.window_start = now;
        }

        if self.on_break {
            Mode::OnBreak {
                remaining: self.rest - (now - self.window_start),
            }
        } else {
            Mode::Working
        }
    }
}
