#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use payperiod_core::{CadenceKind, PayScheduleRecord, TransactionRecord};

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn at_noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    ymd(y, m, d).and_hms_opt(12, 0, 0).expect("valid test time")
}

/// Recurring income whose schedule is anchored on its own date.
pub fn recurring_income(id: &str, date: &str, cadence: CadenceKind) -> TransactionRecord {
    TransactionRecord::income(id, 1_250.0, date).with_schedule(schedule(cadence, date))
}

pub fn schedule(cadence: CadenceKind, last_paid: &str) -> PayScheduleRecord {
    PayScheduleRecord {
        cadence,
        last_paid_date: last_paid.to_string(),
        monthly_days: None,
        custom_days: None,
    }
}
