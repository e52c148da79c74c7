use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DAYS_PER_WEEK: u32 = 7;

/// One cell of a month grid padded to whole weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_other_month: bool,
}

impl CalendarDay {
    fn current(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            date,
            is_current_month: true,
            is_other_month: false,
        }
    }

    fn other(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            date,
            is_current_month: false,
            is_other_month: true,
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Folds a possibly out-of-range zero-based month into `(year, 0..=11)`.
pub fn normalize_month(year: i32, month0: i32) -> (i32, u32) {
    (
        year + month0.div_euclid(12),
        month0.rem_euclid(12) as u32,
    )
}

/// Number of days in the zero-based `month0` of `year`.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let (year, month0) = normalize_month(year, month0 as i32);
    if month0 == 1 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month0 as usize]
    }
}

/// Weekday index (Sunday = 0) of the first day of the month.
pub fn first_weekday(year: i32, month0: u32) -> u32 {
    first_of_month(year, month0)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Prior-month cells needed to align day 1 with `week_start` (both Sunday = 0).
pub fn leading_blanks(first_weekday: u32, week_start: u32) -> u32 {
    (first_weekday % DAYS_PER_WEEK + DAYS_PER_WEEK - week_start % DAYS_PER_WEEK) % DAYS_PER_WEEK
}

/// Shifts `date` by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let (year, month0) = normalize_month(date.year(), date.month0() as i32 + months);
    let day = date.day().min(days_in_month(year, month0));
    NaiveDate::from_ymd_opt(year, month0 + 1, day)
}

/// Builds the month grid for `month0` of `year`, padded with neighbouring-month
/// cells so the length is a multiple of seven.
///
/// Years outside chrono's representable range yield an empty grid.
pub fn generate_month_grid(year: i32, month0: u32, week_start: Weekday) -> Vec<CalendarDay> {
    let (year, month0) = normalize_month(year, month0 as i32);
    match build_grid(year, month0, week_start) {
        Some(grid) => grid,
        None => {
            tracing::warn!(year, month0, "month grid outside the representable date range");
            Vec::new()
        }
    }
}

fn build_grid(year: i32, month0: u32, week_start: Weekday) -> Option<Vec<CalendarDay>> {
    let first = first_of_month(year, month0)?;
    let blanks = leading_blanks(
        first.weekday().num_days_from_sunday(),
        week_start.num_days_from_sunday(),
    );
    let total = days_in_month(year, month0);
    let shift = |offset: i64| first.checked_add_signed(Duration::days(offset));

    let mut grid = Vec::with_capacity(42);
    for i in 0..blanks {
        grid.push(CalendarDay::other(shift(i as i64 - blanks as i64)?));
    }
    for offset in 0..total {
        grid.push(CalendarDay::current(shift(offset as i64)?));
    }
    let trailing = (DAYS_PER_WEEK - grid.len() as u32 % DAYS_PER_WEEK) % DAYS_PER_WEEK;
    for k in 0..trailing {
        grid.push(CalendarDay::other(shift((total + k) as i64)?));
    }
    Some(grid)
}

fn first_of_month(year: i32, month0: u32) -> Option<NaiveDate> {
    let (year, month0) = normalize_month(year, month0 as i32);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
}
