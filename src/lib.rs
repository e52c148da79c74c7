#![doc(test(attr(deny(warnings))))]

//! Pay Period Core turns recurring income schedules into concrete pay dates and
//! a clean partition of time into budgeting periods.
//!
//! Every operation is a pure, synchronous transform. Functions that depend on
//! the current instant take it as a parameter; only [`time::Clock`]-based entry
//! points read the system clock.

pub mod calendar;
pub mod config;
pub mod errors;
pub mod period;
pub mod records;
pub mod schedule;
pub mod time;
pub mod timestamp;
pub mod utils;
pub mod window;

pub use calendar::CalendarDay;
pub use config::EngineConfig;
pub use errors::{CalendarError, ConfigError, PeriodError, RecordError};
pub use period::{get_current_period, resolve_periods, PayPeriod, PeriodResolver};
pub use records::{IncomeRecord, TransactionKind, TransactionRecord};
pub use schedule::{Cadence, CadenceKind, PaySchedule, PayScheduleRecord};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pay Period Core tracing initialized.");
    });
}
