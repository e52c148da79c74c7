//! Fix-ups for artifacts of discrete 7/14/30-day projection.

use chrono::Duration;

use super::PayPeriod;

/// Periods shorter than this many days are suspect.
pub const MIN_PERIOD_DAYS: f64 = 2.0;
/// A suspect period starting within this many days of its predecessor's end is glued onto it.
pub const MAX_GAP_GLUE_DAYS: f64 = 1.5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

fn as_days(span: Duration) -> f64 {
    span.num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Whether `short` is a sliver that belongs to `previous`.
pub fn is_glue_candidate(previous: &PayPeriod, short: &PayPeriod) -> bool {
    as_days(short.duration()) < MIN_PERIOD_DAYS
        && as_days(short.start_date - previous.end_date) < MAX_GAP_GLUE_DAYS
}

/// Folds the active period into its predecessor when it is a short sliver
/// right after it. The predecessor takes over the active flag.
///
/// Returns whether a merge happened.
pub fn merge_short_active_period(periods: &mut Vec<PayPeriod>) -> bool {
    let Some(idx) = periods.iter().position(|period| period.is_active) else {
        return false;
    };
    if idx == 0 || !is_glue_candidate(&periods[idx - 1], &periods[idx]) {
        return false;
    }
    let short = periods.remove(idx);
    let previous = &mut periods[idx - 1];
    previous.end_date = short.end_date;
    previous.is_active = true;
    previous.refresh_display();
    tracing::debug!(
        merged = %short.display_text,
        into = %previous.display_text,
        "glued short active period onto predecessor"
    );
    true
}
