//! Near-term ordering and filtering of dated records for "upcoming / recent" lists.

use chrono::NaiveDate;

use crate::config::WindowSettings;
use crate::records::{IncomeRecord, TransactionRecord};
use crate::timestamp::parse_date;

/// Anything placed on a calendar day. `None` means the date could not be resolved.
pub trait Dated {
    fn dated_on(&self) -> Option<NaiveDate>;
}

impl Dated for NaiveDate {
    fn dated_on(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl Dated for TransactionRecord {
    fn dated_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date).ok()
    }
}

impl Dated for IncomeRecord {
    fn dated_on(&self) -> Option<NaiveDate> {
        Some(self.date.date())
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn dated_on(&self) -> Option<NaiveDate> {
        (**self).dated_on()
    }
}

/// Ascending absolute day distance from `today`. Undated items go last.
pub fn sort_by_proximity<T: Dated>(items: &[T], today: NaiveDate) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| match item.dated_on() {
        Some(date) => (0, (date - today).num_days().abs()),
        None => (1, 0),
    });
    sorted
}

/// Today-or-later first (soonest first), then past items (most recent first).
pub fn sort_by_proximity_future_priority<T: Dated>(items: &[T], today: NaiveDate) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| match item.dated_on() {
        Some(date) if date >= today => (0, (date - today).num_days()),
        Some(date) => (1, (today - date).num_days()),
        None => (2, 0),
    });
    sorted
}

/// [`smart_window_with`] using the default 7-day-back, 30-day-forward window.
pub fn smart_window<T: Dated>(items: &[T], today: NaiveDate) -> Vec<&T> {
    smart_window_with(items, today, &WindowSettings::default())
}

/// Keeps items inside the window around `today`, ordered: today, then upcoming
/// ascending, then past descending.
pub fn smart_window_with<'a, T: Dated>(
    items: &'a [T],
    today: NaiveDate,
    settings: &WindowSettings,
) -> Vec<&'a T> {
    let (earliest, latest) = settings.bounds(today);
    let mut kept: Vec<(u8, i64, &T)> = items
        .iter()
        .filter_map(|item| {
            let date = item.dated_on()?;
            if date < earliest || date > latest {
                return None;
            }
            let rank = if date == today {
                (0, 0)
            } else if date > today {
                (1, (date - today).num_days())
            } else {
                (2, (today - date).num_days())
            };
            Some((rank.0, rank.1, item))
        })
        .collect();
    kept.sort_by_key(|(bucket, distance, _)| (*bucket, *distance));
    kept.into_iter().map(|(_, _, item)| item).collect()
}
