//! Conversions between `(year, month, week-of-month, weekday)` and concrete dates.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use super::month::first_weekday;
use crate::errors::CalendarError;
use crate::timestamp::{format_timestamp, parse_instant, start_of_day};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;
pub const MAX_WEEK_OF_MONTH: u32 = 5;

/// Parses a weekday name such as `"friday"` or `"Fri"`, ignoring case.
pub fn parse_weekday_name(name: &str) -> Result<Weekday, CalendarError> {
    name.trim()
        .parse::<Weekday>()
        .map_err(|_| CalendarError::UnknownWeekday(name.to_string()))
}

/// Resolves the `week_number`-th `weekday` of `month0` in `year`.
///
/// When the requested week does not exist in the month (a fifth Monday in a
/// month with four), the last occurrence of that weekday is returned instead.
pub fn resolve_week_and_day(
    year: i32,
    month0: u32,
    week_number: u32,
    weekday: Weekday,
) -> Result<NaiveDate, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::InvalidYear(year));
    }
    if month0 > 11 {
        return Err(CalendarError::InvalidMonth(month0));
    }
    if !(1..=MAX_WEEK_OF_MONTH).contains(&week_number) {
        return Err(CalendarError::InvalidWeekNumber(week_number));
    }
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .ok_or(CalendarError::InvalidMonth(month0))?;
    let offset = (weekday.num_days_from_sunday() + 7 - first.weekday().num_days_from_sunday()) % 7;
    let first_match = first + Duration::days(offset as i64);
    let candidate = first_match + Duration::weeks((week_number - 1) as i64);
    if candidate.month0() == month0 {
        Ok(candidate)
    } else {
        Ok(candidate - Duration::weeks(1))
    }
}

/// 1-based row of the Sunday-first month grid containing `date`, capped at five.
pub fn week_of_month(date: NaiveDate) -> u32 {
    let offset = first_weekday(date.year(), date.month0());
    ((date.day() + offset + 6) / 7).clamp(1, MAX_WEEK_OF_MONTH)
}

/// [`week_of_month`] for a raw timestamp; unparseable input maps to week 1.
pub fn week_of_month_iso(raw: &str) -> u32 {
    match parse_instant(raw) {
        Ok(instant) => week_of_month(instant.date()),
        Err(err) => {
            tracing::debug!(%err, "week-of-month fallback to 1");
            1
        }
    }
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

/// [`weekday_name`] for a raw timestamp; unparseable input maps to `"sunday"`.
pub fn weekday_name_iso(raw: &str) -> &'static str {
    match parse_instant(raw) {
        Ok(instant) => weekday_name(instant.date()),
        Err(err) => {
            tracing::debug!(%err, "weekday name fallback to sunday");
            "sunday"
        }
    }
}

/// Resolves a week/weekday pair inside the month of `reference` (defaults to `now`)
/// and returns it as a midnight timestamp.
///
/// An unparseable reference or a rejected resolution degrades to `now`.
pub fn resolve_income_date(
    week_number: u32,
    weekday: Weekday,
    reference: Option<&str>,
    now: NaiveDateTime,
) -> String {
    let reference = match reference.map(parse_instant) {
        Some(Ok(instant)) => instant,
        Some(Err(err)) => {
            tracing::debug!(%err, "income date reference fallback to now");
            now
        }
        None => now,
    };
    match resolve_week_and_day(reference.year(), reference.month0(), week_number, weekday) {
        Ok(date) => format_timestamp(start_of_day(date)),
        Err(err) => {
            tracing::debug!(%err, "income date resolution fallback to now");
            format_timestamp(now)
        }
    }
}
