use chrono::{Days, NaiveDate, NaiveDateTime};

use super::{
    entry::{IncomeEntry, ProjectedIncome},
    repair::merge_short_active_period,
    PayPeriod, OPEN_END,
};
use crate::calendar::add_months;
use crate::config::EngineConfig;
use crate::errors::PeriodError;
use crate::records::{IncomeRecord, TransactionRecord};
use crate::schedule::PaySchedule;
use crate::time::Clock;
use crate::timestamp::{end_of_day, start_of_day};

/// Default number of projections synthesized per recurring income.
pub const MAX_PROJECTED_OCCURRENCES: usize = 6;

/// Partitions time into pay periods from a live transaction list.
///
/// Periods are recomputed from scratch on every call; the resolver holds only
/// configuration and is safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct PeriodResolver {
    config: EngineConfig,
}

impl PeriodResolver {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves the ordered, non-overlapping pay periods as seen from `today`.
    pub fn resolve(
        &self,
        records: &[TransactionRecord],
        today: NaiveDateTime,
    ) -> Result<Vec<PayPeriod>, PeriodError> {
        let incomes = collect_incomes(records);
        if incomes.is_empty() {
            return Err(PeriodError::NoIncomeTransactions);
        }
        let entries = self.timeline(incomes, today);
        let mut periods = self.build_periods(&entries, today)?;
        self.backdate_first(&mut periods, &entries, today)?;
        mark_active(&mut periods, today);
        merge_short_active_period(&mut periods);
        self.bridge_to_first_income(&mut periods, &entries, today)?;
        tracing::debug!(
            incomes = entries.len(),
            periods = periods.len(),
            "resolved pay periods"
        );
        Ok(periods)
    }

    /// The single period containing `today`, if any.
    pub fn current(
        &self,
        records: &[TransactionRecord],
        today: NaiveDateTime,
    ) -> Option<PayPeriod> {
        match self.resolve(records, today) {
            Ok(periods) => periods.into_iter().find(|period| period.is_active),
            Err(err) if err.is_benign() => {
                tracing::debug!("no income transactions, no current pay period");
                None
            }
            Err(err) => {
                tracing::error!(%err, "failed to resolve pay periods");
                None
            }
        }
    }

    /// Real incomes merged with their projections, ascending, one entry per calendar day.
    ///
    /// A recurring income first catches up to its latest scheduled occurrence on
    /// or before `today`, then is projected forward until the first occurrence
    /// after `today`, within the configured count and horizon. The catch-up
    /// entry does not count towards the limit. On a day already holding a real
    /// income the real one wins.
    pub fn timeline(&self, incomes: Vec<IncomeRecord>, today: NaiveDateTime) -> Vec<IncomeEntry> {
        let settings = self.config.projection;
        let today_date = today.date();
        let horizon = add_months(today_date, settings.horizon_months as i32).unwrap_or(NaiveDate::MAX);

        let mut projected = Vec::new();
        for income in incomes.iter().filter(|income| income.is_recurring) {
            let Some(schedule) = income.pay_schedule.as_ref() else {
                tracing::debug!(id = %income.id, "recurring income without a usable schedule");
                continue;
            };
            let mut cursor = income.date.date();
            if let Some(latest) = schedule
                .latest_on_or_before(today_date)
                .filter(|latest| *latest > cursor)
            {
                tracing::debug!(id = %income.id, %latest, "caught up to latest scheduled payday");
                projected.push(projection(income, schedule, latest));
                cursor = latest;
            }
            for _ in 0..settings.max_occurrences {
                let Some(next) = schedule.next_occurrence(Some(cursor)) else {
                    tracing::debug!(id = %income.id, "schedule produced no further occurrence");
                    break;
                };
                if next > horizon || next <= cursor {
                    break;
                }
                projected.push(projection(income, schedule, next));
                cursor = next;
                if next > today_date {
                    break;
                }
            }
        }

        let mut entries: Vec<IncomeEntry> = incomes.into_iter().map(IncomeEntry::Real).collect();
        entries.extend(projected);
        entries.sort_by_key(|entry| (entry.date().date(), entry.is_projected(), entry.date()));
        entries.dedup_by_key(|entry| entry.date().date());
        entries
    }

    fn build_periods(
        &self,
        entries: &[IncomeEntry],
        today: NaiveDateTime,
    ) -> Result<Vec<PayPeriod>, PeriodError> {
        let mut periods = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let start = start_of_day(entry.date().date());
            let end = match entries.get(idx + 1) {
                Some(next) => end_of_day(previous_day(next.date().date())?),
                None => final_period_end(entry, start, today)?,
            };
            periods.push(PayPeriod::new(start, end));
        }
        Ok(periods)
    }

    /// Pulls a future first period back so the timeline is already in progress.
    fn backdate_first(
        &self,
        periods: &mut [PayPeriod],
        entries: &[IncomeEntry],
        today: NaiveDateTime,
    ) -> Result<(), PeriodError> {
        let (Some(first), Some(entry)) = (periods.first_mut(), entries.first()) else {
            return Ok(());
        };
        if first.start_date > today && entry.is_recurring() {
            first.start_date = self.backdated_start(today)?;
            first.refresh_display();
        }
        Ok(())
    }

    /// When nothing is active but the first income is a near-future recurring
    /// one, prepends an active period running up to it.
    fn bridge_to_first_income(
        &self,
        periods: &mut Vec<PayPeriod>,
        entries: &[IncomeEntry],
        today: NaiveDateTime,
    ) -> Result<(), PeriodError> {
        if periods.iter().any(|period| period.is_active) {
            return Ok(());
        }
        let Some(earliest) = entries.first() else {
            return Ok(());
        };
        let earliest_date = earliest.date().date();
        let limit = add_months(today.date(), self.config.fallback_horizon_months as i32)
            .unwrap_or(NaiveDate::MAX);
        if earliest_date <= today.date() || earliest_date > limit || !earliest.is_recurring() {
            return Ok(());
        }
        let mut bridge = PayPeriod::new(
            self.backdated_start(today)?,
            end_of_day(previous_day(earliest_date)?),
        );
        bridge.is_active = true;
        periods.insert(0, bridge);
        Ok(())
    }

    fn backdated_start(&self, today: NaiveDateTime) -> Result<NaiveDateTime, PeriodError> {
        today
            .date()
            .checked_sub_days(Days::new(self.config.backdate_days.max(0) as u64))
            .map(start_of_day)
            .ok_or_else(|| PeriodError::DateOutOfRange(format!("{today} minus backdate")))
    }
}

fn projection(income: &IncomeRecord, schedule: &PaySchedule, date: NaiveDate) -> IncomeEntry {
    IncomeEntry::Projected(ProjectedIncome {
        source_id: income.id.clone(),
        date: start_of_day(date),
        amount: income.amount,
        schedule: schedule.clone(),
    })
}

/// Parsed incomes, ascending. Unparseable records are logged and skipped.
fn collect_incomes(records: &[TransactionRecord]) -> Vec<IncomeRecord> {
    let mut incomes: Vec<IncomeRecord> = records
        .iter()
        .filter(|record| record.is_income())
        .filter_map(|record| match IncomeRecord::try_from(record) {
            Ok(income) => Some(income),
            Err(err) => {
                tracing::warn!(id = %record.id, %err, "skipping income record");
                None
            }
        })
        .collect();
    incomes.sort_by_key(|income| income.date);
    incomes
}

/// End of the last period: one cadence step on, or one month when the step is unknown.
/// A last income still in the future leaves the period open-ended.
fn final_period_end(
    entry: &IncomeEntry,
    start: NaiveDateTime,
    today: NaiveDateTime,
) -> Result<NaiveDateTime, PeriodError> {
    if today < start {
        return Ok(OPEN_END);
    }
    let start_date = start.date();
    let boundary = entry
        .schedule()
        .and_then(|schedule| schedule.next_occurrence(Some(start_date)))
        .or_else(|| add_months(start_date, 1))
        .ok_or_else(|| PeriodError::DateOutOfRange(format!("{start_date} plus one period")))?;
    Ok(end_of_day(previous_day(boundary)?))
}

fn previous_day(date: NaiveDate) -> Result<NaiveDate, PeriodError> {
    date.pred_opt()
        .ok_or_else(|| PeriodError::DateOutOfRange(format!("day before {date}")))
}

fn mark_active(periods: &mut [PayPeriod], today: NaiveDateTime) {
    let mut found = false;
    for period in periods.iter_mut() {
        period.is_active = !found && period.contains(today);
        found |= period.is_active;
    }
}

/// [`PeriodResolver::resolve`] with default configuration.
pub fn resolve_periods(
    records: &[TransactionRecord],
    today: NaiveDateTime,
) -> Result<Vec<PayPeriod>, PeriodError> {
    PeriodResolver::default().resolve(records, today)
}

/// [`PeriodResolver::current`] with default configuration.
pub fn get_current_period(
    records: &[TransactionRecord],
    today: NaiveDateTime,
) -> Option<PayPeriod> {
    PeriodResolver::default().current(records, today)
}

/// Reads `clock` once and resolves the periods for that instant.
pub fn resolve_periods_now(
    records: &[TransactionRecord],
    clock: &dyn Clock,
) -> Result<Vec<PayPeriod>, PeriodError> {
    resolve_periods(records, clock.now())
}

/// Reads `clock` once and resolves the current period for that instant.
pub fn current_period_now(records: &[TransactionRecord], clock: &dyn Clock) -> Option<PayPeriod> {
    get_current_period(records, clock.now())
}
