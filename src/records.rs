//! Plain transaction records supplied by storage, and the validated income view
//! the resolver works on.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::RecordError;
use crate::schedule::{PaySchedule, PayScheduleRecord};
use crate::timestamp::parse_instant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub amount: f64,
    /// ISO-8601 timestamp.
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_schedule: Option<PayScheduleRecord>,
}

impl TransactionRecord {
    pub fn income(id: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount,
            date: date.into(),
            kind: TransactionKind::Income,
            is_recurring: false,
            pay_schedule: None,
        }
    }

    pub fn expense(id: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            kind: TransactionKind::Expense,
            ..Self::income(id, amount, date)
        }
    }

    /// Marks the record recurring with the given schedule.
    pub fn with_schedule(mut self, schedule: PayScheduleRecord) -> Self {
        self.is_recurring = true;
        self.pay_schedule = Some(schedule);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// An income with a parsed date and, when usable, a parsed schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRecord {
    pub id: String,
    pub amount: f64,
    pub date: NaiveDateTime,
    pub is_recurring: bool,
    pub pay_schedule: Option<PaySchedule>,
}

impl TryFrom<&TransactionRecord> for IncomeRecord {
    type Error = RecordError;

    /// Fails only when the income's own date is unusable. A corrupt schedule
    /// anchor drops the schedule and keeps the income.
    fn try_from(record: &TransactionRecord) -> Result<Self, Self::Error> {
        let date = parse_instant(&record.date)?;
        let pay_schedule = match record.pay_schedule.as_ref().map(PaySchedule::try_from) {
            Some(Ok(schedule)) => Some(schedule),
            Some(Err(err)) => {
                tracing::warn!(id = %record.id, %err, "ignoring corrupt pay schedule");
                None
            }
            None => None,
        };
        Ok(Self {
            id: record.id.clone(),
            amount: record.amount,
            date,
            is_recurring: record.is_recurring,
            pay_schedule,
        })
    }
}
