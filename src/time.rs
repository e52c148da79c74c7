use chrono::{Local, NaiveDate, NaiveDateTime};

/// Clock abstracts access to the current instant so resolution stays deterministic in tests.
///
/// Only outermost entry points read a clock; everything below receives the
/// instant as a parameter so one call observes a single consistent "now".
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock instant.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Real-time clock backed by the system local time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
