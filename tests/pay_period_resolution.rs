mod common;

use common::{at_noon, recurring_income, schedule, ymd};
use insta::assert_snapshot;
use payperiod_core::{
    config::EngineConfig,
    get_current_period,
    period::{current_period_now, resolve_periods_now},
    resolve_periods,
    time::FixedClock,
    timestamp::{end_of_day, start_of_day},
    CadenceKind, PayPeriod, PeriodError, PeriodResolver, TransactionRecord,
};

fn display(periods: &[PayPeriod]) -> String {
    periods
        .iter()
        .map(|period| period.display_text.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[test]
fn no_transactions_is_a_benign_error() {
    let err = resolve_periods(&[], at_noon(2025, 8, 5)).unwrap_err();
    assert_eq!(err, PeriodError::NoIncomeTransactions);
    assert_eq!(err.to_string(), "No income transactions found");
    assert!(err.is_benign());
    assert_eq!(get_current_period(&[], at_noon(2025, 8, 5)), None);
}

#[test]
fn expenses_alone_do_not_form_periods() {
    let records = vec![
        TransactionRecord::expense("rent", 900.0, "2025-08-01"),
        TransactionRecord::expense("gym", 40.0, "2025-08-03"),
    ];
    assert_eq!(
        resolve_periods(&records, at_noon(2025, 8, 5)),
        Err(PeriodError::NoIncomeTransactions)
    );
}

#[test]
fn single_biweekly_income_yields_two_periods() {
    let today = at_noon(2025, 8, 5);
    let records = vec![recurring_income(
        "salary",
        "2025-08-01T00:00:00.000Z",
        CadenceKind::EveryTwoWeeks,
    )];
    let periods = resolve_periods(&records, today).unwrap();

    assert_eq!(periods.len(), 2);
    let active: Vec<&PayPeriod> = periods.iter().filter(|p| p.is_active).collect();
    assert_eq!(active.len(), 1);
    assert!(active[0].contains(today));
    assert_eq!(active[0].start_date, start_of_day(ymd(2025, 8, 1)));
    assert_eq!(active[0].end_date, end_of_day(ymd(2025, 8, 14)));
    assert!(periods[1].is_open_ended());
    assert_snapshot!(display(&periods), @"8/1 – 8/14 | 8/15");
}

#[test]
fn resolution_is_idempotent() {
    let today = at_noon(2025, 8, 20);
    let records = vec![
        recurring_income("salary", "2025-08-01", CadenceKind::EveryTwoWeeks),
        TransactionRecord::income("bonus", 300.0, "2025-08-09"),
        TransactionRecord::expense("rent", 900.0, "2025-08-02"),
    ];
    let first = resolve_periods(&records, today);
    let second = resolve_periods(&records, today);
    assert_eq!(first, second);
}

#[test]
fn periods_are_ordered_and_disjoint() {
    let today = at_noon(2025, 8, 20);
    let records = vec![
        recurring_income("salary", "2025-06-06", CadenceKind::EveryTwoWeeks),
        recurring_income("side", "2025-07-10", CadenceKind::Monthly),
        TransactionRecord::income("refund", 80.0, "2025-07-22"),
    ];
    let periods = resolve_periods(&records, today).unwrap();
    for pair in periods.windows(2) {
        assert!(pair[0].end_date < pair[1].start_date);
    }
    assert!(periods.iter().all(|p| p.end_date >= p.start_date));
    assert_eq!(periods.iter().filter(|p| p.is_active).count(), 1);
}

#[test]
fn projected_sliver_is_glued_onto_previous_period() {
    // The biweekly projection lands on Aug 15 and a real bonus on Aug 16,
    // leaving a one-day period that contains today.
    let today = at_noon(2025, 8, 15);
    let records = vec![
        recurring_income("salary", "2025-08-01", CadenceKind::EveryTwoWeeks),
        TransactionRecord::income("bonus", 300.0, "2025-08-16"),
    ];
    let periods = resolve_periods(&records, today).unwrap();

    assert_snapshot!(display(&periods), @"8/1 – 8/15 | 8/16 – 8/28 | 8/29");
    assert!(periods[0].is_active);
    assert_eq!(periods[0].end_date, end_of_day(ymd(2025, 8, 15)));

    let current = get_current_period(&records, today).unwrap();
    assert_eq!(current, periods[0]);
}

#[test]
fn future_first_income_is_backdated_to_include_today() {
    let today = at_noon(2025, 8, 20);
    let records = vec![recurring_income("salary", "2025-09-05", CadenceKind::Monthly)];
    let periods = resolve_periods(&records, today).unwrap();

    assert_snapshot!(display(&periods), @"7/21 – 10/4 | 10/5");
    assert!(periods[0].is_active);
    assert_eq!(periods[0].start_date, start_of_day(ymd(2025, 7, 21)));
}

#[test]
fn backdate_distance_comes_from_config() {
    let today = at_noon(2025, 8, 20);
    let records = vec![recurring_income("salary", "2025-09-05", CadenceKind::Monthly)];
    let resolver = PeriodResolver::new(EngineConfig {
        backdate_days: 14,
        ..EngineConfig::default()
    });
    let current = resolver.current(&records, today).unwrap();
    assert_eq!(current.start_date, start_of_day(ymd(2025, 8, 6)));
    assert_eq!(current.display_text, "8/6 – 10/4");
}

#[test]
fn twice_monthly_income_projects_to_next_payday() {
    let today = at_noon(2025, 8, 20);
    let mut pay = schedule(CadenceKind::TwiceMonthly, "2025-08-01");
    pay.monthly_days = Some(vec![1, 15]);
    let records = vec![TransactionRecord::income("salary", 2_000.0, "2025-08-01").with_schedule(pay)];
    let periods = resolve_periods(&records, today).unwrap();

    assert_snapshot!(display(&periods), @"8/1 – 8/14 | 8/15 – 8/31 | 9/1");
    assert!(periods[1].is_active);
}

#[test]
fn long_running_schedule_catches_up_to_today() {
    let today = at_noon(2025, 8, 20);
    let records = vec![recurring_income("salary", "2025-06-27", CadenceKind::Weekly)];
    let periods = resolve_periods(&records, today).unwrap();

    assert_snapshot!(display(&periods), @"6/27 – 8/14 | 8/15 – 8/21 | 8/22");
    let current = get_current_period(&records, today).unwrap();
    assert!(current.contains(today));
    assert_eq!(current.start_date, start_of_day(ymd(2025, 8, 15)));
    assert_eq!(current.end_date, end_of_day(ymd(2025, 8, 21)));
    assert_eq!(periods.iter().filter(|p| p.is_active).count(), 1);
}

#[test]
fn months_old_anchor_still_has_a_current_period() {
    let today = at_noon(2025, 8, 20);
    let records = vec![recurring_income("salary", "2025-01-03", CadenceKind::Weekly)];
    let periods = resolve_periods(&records, today).unwrap();

    assert_snapshot!(display(&periods), @"1/3 – 8/14 | 8/15 – 8/21 | 8/22");
    assert!(periods[1].is_active);
}

#[test]
fn corrupt_records_are_skipped() {
    let today = at_noon(2025, 8, 5);
    let mut broken_schedule = recurring_income("broken", "2025-07-20", CadenceKind::Weekly);
    if let Some(pay) = broken_schedule.pay_schedule.as_mut() {
        pay.last_paid_date = "not-a-date".into();
    }
    let records = vec![
        TransactionRecord::income("garbled", 10.0, "32/13/2025"),
        broken_schedule,
        recurring_income("salary", "2025-08-01", CadenceKind::EveryTwoWeeks),
    ];
    let periods = resolve_periods(&records, today).unwrap();

    assert_snapshot!(display(&periods), @"7/20 – 7/31 | 8/1 – 8/14 | 8/15");
    assert!(periods[1].is_active);
}

#[test]
fn clock_entry_point_reads_one_instant() {
    let records = vec![recurring_income(
        "salary",
        "2025-08-01",
        CadenceKind::EveryTwoWeeks,
    )];
    let clock = FixedClock(at_noon(2025, 8, 5));
    let current = current_period_now(&records, &clock).unwrap();
    assert_eq!(current.display_text, "8/1 – 8/14");
}

#[test]
fn clock_entry_point_resolves_all_periods() {
    let records = vec![recurring_income(
        "salary",
        "2025-08-01",
        CadenceKind::EveryTwoWeeks,
    )];
    let clock = FixedClock(at_noon(2025, 8, 5));
    let periods = resolve_periods_now(&records, &clock).unwrap();
    assert_eq!(periods, resolve_periods(&records, at_noon(2025, 8, 5)).unwrap());
    assert_snapshot!(display(&periods), @"8/1 – 8/14 | 8/15");
}
