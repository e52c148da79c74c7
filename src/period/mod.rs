//! Pay periods: contiguous ranges bounded by consecutive real or projected incomes.

pub mod entry;
pub mod repair;
pub mod resolver;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub use entry::{IncomeEntry, ProjectedIncome};
pub use repair::{merge_short_active_period, MAX_GAP_GLUE_DAYS, MIN_PERIOD_DAYS};
pub use resolver::{
    current_period_now, get_current_period, resolve_periods, resolve_periods_now, PeriodResolver,
    MAX_PROJECTED_OCCURRENCES,
};

/// End bound of a period whose closing income is not known yet.
pub const OPEN_END: NaiveDateTime = NaiveDateTime::MAX;

/// Inclusive `[start_date, end_date]` budgeting range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriod {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_active: bool,
    pub display_text: String,
}

impl PayPeriod {
    pub fn new(start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        let mut period = Self {
            start_date,
            end_date,
            is_active: false,
            display_text: String::new(),
        };
        period.refresh_display();
        period
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start_date <= instant && instant <= self.end_date
    }

    pub fn duration(&self) -> Duration {
        self.end_date - self.start_date
    }

    pub fn is_open_ended(&self) -> bool {
        self.end_date == OPEN_END
    }

    /// Recomputes `display_text` after a bound changes.
    pub fn refresh_display(&mut self) {
        self.display_text = if self.is_open_ended() {
            short_date(self.start_date.date())
        } else {
            format!(
                "{} \u{2013} {}",
                short_date(self.start_date.date()),
                short_date(self.end_date.date())
            )
        };
    }
}

fn short_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}
