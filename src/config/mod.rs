//! Tunables for projection and display windows.
//!
//! Values are plain data handed in by the caller; hosts may keep them as JSON.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::period::MAX_PROJECTED_OCCURRENCES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub projection: ProjectionSettings,
    /// How far before today an in-progress period is backdated.
    pub backdate_days: i64,
    /// A future first income further out than this is not bridged with a synthetic period.
    pub fallback_horizon_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionSettings::default(),
            backdate_days: 30,
            fallback_horizon_months: 12,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Projected occurrences synthesized per recurring income.
    pub max_occurrences: usize,
    /// Projections never land later than this many months after today.
    pub horizon_months: u32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            max_occurrences: MAX_PROJECTED_OCCURRENCES,
            horizon_months: 6,
        }
    }
}

/// Width of the near-term window used by [`crate::window::smart_window_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub past_days: i64,
    pub future_days: i64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            past_days: 7,
            future_days: 30,
        }
    }
}

impl WindowSettings {
    /// Inclusive `[earliest, latest]` dates around `today`. Negative widths count as zero.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let earliest = today
            .checked_sub_days(Days::new(self.past_days.max(0) as u64))
            .unwrap_or(NaiveDate::MIN);
        let latest = today
            .checked_add_days(Days::new(self.future_days.max(0) as u64))
            .unwrap_or(NaiveDate::MAX);
        (earliest, latest)
    }
}
