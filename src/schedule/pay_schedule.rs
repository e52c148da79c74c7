use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::cadence::{Cadence, CadenceKind};
use crate::calendar::{add_months, days_in_month, normalize_month};
use crate::errors::RecordError;
use crate::timestamp::parse_date;

/// Ceiling on `next_occurrence` calls made while enumerating a range.
pub const MAX_RANGE_ITERATIONS: usize = 500;
/// Months scanned for a day-of-month cadence before giving up.
pub const MAX_MONTH_SCAN: i32 = 24;

/// Pay schedule exactly as attached to an incoming record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayScheduleRecord {
    pub cadence: CadenceKind,
    pub last_paid_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_days: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_days: Option<Vec<u32>>,
}

impl PayScheduleRecord {
    /// Next occurrence computed straight from the raw record; `None` when the
    /// anchor date is unparseable or the cadence has no valid days.
    pub fn next_occurrence(&self, after: Option<NaiveDate>) -> Option<NaiveDate> {
        match PaySchedule::try_from(self) {
            Ok(schedule) => schedule.next_occurrence(after),
            Err(err) => {
                tracing::debug!(%err, "pay schedule anchor rejected");
                None
            }
        }
    }
}

/// A cadence anchored to the last known real occurrence.
///
/// The anchor itself is the first occurrence; nothing before it is produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaySchedule {
    pub cadence: Cadence,
    pub anchor: NaiveDate,
}

impl TryFrom<&PayScheduleRecord> for PaySchedule {
    type Error = RecordError;

    fn try_from(record: &PayScheduleRecord) -> Result<Self, Self::Error> {
        let anchor = parse_date(&record.last_paid_date)?;
        let cadence = Cadence::from_parts(
            record.cadence,
            record.monthly_days.as_deref(),
            record.custom_days.as_deref(),
        );
        Ok(Self { cadence, anchor })
    }
}

impl PaySchedule {
    pub fn new(cadence: Cadence, anchor: NaiveDate) -> Self {
        Self { cadence, anchor }
    }

    /// Earliest occurrence strictly after `after` (or after the anchor when omitted).
    pub fn next_occurrence(&self, after: Option<NaiveDate>) -> Option<NaiveDate> {
        let after = after.unwrap_or(self.anchor);
        if after < self.anchor {
            return Some(self.anchor);
        }
        match &self.cadence {
            Cadence::Weekly | Cadence::EveryTwoWeeks => {
                let step = self.cadence.step_days()?;
                next_linear(self.anchor, after, step)
            }
            Cadence::Monthly => next_monthly(self.anchor, after),
            Cadence::TwiceMonthly { days } => next_on_days(after, days),
            Cadence::Custom { days } => next_on_days(after, days),
        }
    }

    /// Latest occurrence on or before `date`; `None` when `date` precedes the anchor.
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<NaiveDate> {
        if date < self.anchor {
            return None;
        }
        match &self.cadence {
            Cadence::Weekly | Cadence::EveryTwoWeeks => {
                let step = self.cadence.step_days()?;
                let steps = (date - self.anchor).num_days().div_euclid(step);
                self.anchor.checked_add_signed(Duration::days(steps * step))
            }
            Cadence::Monthly => latest_monthly(self.anchor, date),
            Cadence::TwiceMonthly { days } => Some(self.latest_on_days_or_anchor(date, days)),
            Cadence::Custom { days } => Some(self.latest_on_days_or_anchor(date, days)),
        }
    }

    fn latest_on_days_or_anchor(&self, date: NaiveDate, days: &[u32]) -> NaiveDate {
        latest_on_days(date, days)
            .filter(|found| *found > self.anchor)
            .unwrap_or(self.anchor)
    }

    /// All occurrences inside `[start, end]`, ascending and duplicate-free.
    ///
    /// Enumeration stops after [`MAX_RANGE_ITERATIONS`] steps and returns what
    /// was found so far.
    pub fn occurrences_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut found = Vec::new();
        if end < start {
            return found;
        }
        let mut cursor = start.pred_opt().unwrap_or(start);
        for _ in 0..MAX_RANGE_ITERATIONS {
            let Some(next) = self.next_occurrence(Some(cursor)) else {
                break;
            };
            if next > end || next <= cursor {
                break;
            }
            found.push(next);
            cursor = next;
        }
        if found.len() == MAX_RANGE_ITERATIONS {
            tracing::debug!(%start, %end, "occurrence enumeration hit the iteration cap");
        }
        found
    }

    /// The next `count` occurrences after `after`, for schedule previews.
    pub fn upcoming(&self, after: NaiveDate, count: usize) -> Vec<NaiveDate> {
        let mut found = Vec::with_capacity(count.min(MAX_RANGE_ITERATIONS));
        let mut cursor = after;
        for _ in 0..count.min(MAX_RANGE_ITERATIONS) {
            match self.next_occurrence(Some(cursor)) {
                Some(next) if next > cursor => {
                    found.push(next);
                    cursor = next;
                }
                _ => break,
            }
        }
        found
    }

    pub fn label(&self) -> String {
        self.cadence.label()
    }
}

fn next_linear(anchor: NaiveDate, after: NaiveDate, step: i64) -> Option<NaiveDate> {
    let elapsed = (after - anchor).num_days();
    let steps = elapsed.div_euclid(step) + 1;
    anchor.checked_add_signed(Duration::days(steps * step))
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn next_monthly(anchor: NaiveDate, after: NaiveDate) -> Option<NaiveDate> {
    let elapsed = (month_index(after) - month_index(anchor)).max(0);
    (elapsed..=elapsed + 2)
        .filter_map(|months| add_months(anchor, months))
        .find(|candidate| *candidate > after)
}

fn latest_monthly(anchor: NaiveDate, on_or_before: NaiveDate) -> Option<NaiveDate> {
    let elapsed = (month_index(on_or_before) - month_index(anchor)).max(0);
    ((elapsed - 1).max(0)..=elapsed)
        .rev()
        .filter_map(|months| add_months(anchor, months))
        .find(|candidate| *candidate <= on_or_before)
}

fn next_on_days(after: NaiveDate, days: &[u32]) -> Option<NaiveDate> {
    if days.is_empty() {
        return None;
    }
    (0..MAX_MONTH_SCAN).find_map(|offset| {
        let (year, month0) = normalize_month(after.year(), after.month0() as i32 + offset);
        days_in(year, month0, days)
            .filter(|candidate| *candidate > after)
            .min()
    })
}

fn latest_on_days(on_or_before: NaiveDate, days: &[u32]) -> Option<NaiveDate> {
    (0..MAX_MONTH_SCAN).find_map(|offset| {
        let (year, month0) =
            normalize_month(on_or_before.year(), on_or_before.month0() as i32 - offset);
        days_in(year, month0, days)
            .filter(|candidate| *candidate <= on_or_before)
            .max()
    })
}

/// The configured days that exist in the month, clamped to its last day. Day 0 is skipped.
fn days_in(year: i32, month0: u32, days: &[u32]) -> impl Iterator<Item = NaiveDate> + '_ {
    let length = days_in_month(year, month0);
    days.iter()
        .filter(|day| **day > 0)
        .filter_map(move |day| NaiveDate::from_ymd_opt(year, month0 + 1, (*day).min(length)))
}
