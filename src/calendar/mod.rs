//! Gregorian calendar helpers: month arithmetic, month grids, and week-of-month resolution.

pub mod month;
pub mod weekday;

pub use month::{
    add_months, days_in_month, first_weekday, generate_month_grid, is_leap_year, leading_blanks,
    normalize_month, CalendarDay,
};
pub use weekday::{
    parse_weekday_name, resolve_income_date, resolve_week_and_day, week_of_month,
    week_of_month_iso, weekday_name, weekday_name_iso, MAX_WEEK_OF_MONTH, MAX_YEAR, MIN_YEAR,
};
