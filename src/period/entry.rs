use chrono::NaiveDateTime;

use crate::records::IncomeRecord;
use crate::schedule::PaySchedule;

/// Synthetic income produced from a recurring schedule. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedIncome {
    pub source_id: String,
    pub date: NaiveDateTime,
    pub amount: f64,
    pub schedule: PaySchedule,
}

/// A point on the income timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomeEntry {
    Real(IncomeRecord),
    Projected(ProjectedIncome),
}

impl IncomeEntry {
    pub fn date(&self) -> NaiveDateTime {
        match self {
            IncomeEntry::Real(record) => record.date,
            IncomeEntry::Projected(projected) => projected.date,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            IncomeEntry::Real(record) => record.amount,
            IncomeEntry::Projected(projected) => projected.amount,
        }
    }

    /// Schedule used to step past this entry, if any.
    pub fn schedule(&self) -> Option<&PaySchedule> {
        match self {
            IncomeEntry::Real(record) => record.pay_schedule.as_ref(),
            IncomeEntry::Projected(projected) => Some(&projected.schedule),
        }
    }

    pub fn is_recurring(&self) -> bool {
        match self {
            IncomeEntry::Real(record) => record.is_recurring,
            IncomeEntry::Projected(_) => true,
        }
    }

    pub fn is_projected(&self) -> bool {
        matches!(self, IncomeEntry::Projected(_))
    }

    /// Id of the real record this entry is, or was projected from.
    pub fn source_id(&self) -> &str {
        match self {
            IncomeEntry::Real(record) => &record.id,
            IncomeEntry::Projected(projected) => &projected.source_id,
        }
    }
}
