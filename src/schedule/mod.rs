//! Recurring pay schedules and occurrence enumeration.

pub mod cadence;
pub mod pay_schedule;

pub use cadence::{Cadence, CadenceKind, DEFAULT_TWICE_MONTHLY_DAYS, MAX_CUSTOM_DAYS};
pub use pay_schedule::{PaySchedule, PayScheduleRecord, MAX_MONTH_SCAN, MAX_RANGE_ITERATIONS};
