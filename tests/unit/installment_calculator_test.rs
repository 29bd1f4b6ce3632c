// Installment schedules: exact totals, trailing extra cents, business-day due dates

use chrono::{Datelike, NaiveDate};
use paytrack::calendar::is_business_day;
use paytrack::config::BillingConfig;
use paytrack::installments::{
    schedule_total, Contract, DueDateRule, InstallmentCalculator, InstallmentStatus,
};
use paytrack::money::euros_to_cents;
use paytrack::AppError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_twelve_month_contract() {
    let contract = Contract::new("ctr-2025-001", "cli-42", dec!(1000.00), 12, date(2025, 1, 10));
    let schedule = InstallmentCalculator::new(360, DueDateRule::LastBusinessDayOfMonth)
        .calculate_schedule(&contract)
        .expect("Failed to calculate schedule");

    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule_total(&schedule), dec!(1000.00));

    // 100000 cents / 12 = 8333 remainder 4: last four installments carry the extra cent
    for installment in &schedule[..8] {
        assert_eq!(installment.amount, dec!(83.33));
    }
    for installment in &schedule[8..] {
        assert_eq!(installment.amount, dec!(83.34));
    }

    for (i, installment) in schedule.iter().enumerate() {
        assert_eq!(installment.contract_id, "ctr-2025-001");
        assert_eq!(installment.installment_number as usize, i + 1);
        assert_eq!(installment.status, InstallmentStatus::Pending);
        assert!(is_business_day(installment.due_date));
        assert_eq!(installment.due_date.month() as usize, i + 1);
    }

    // May 2025 ends on a Saturday, November 2025 on a Sunday
    assert_eq!(schedule[4].due_date, date(2025, 5, 30));
    assert_eq!(schedule[10].due_date, date(2025, 11, 28));
    assert_eq!(schedule[11].due_date, date(2025, 12, 31));
}

#[test]
fn test_same_day_rule_rolls_over_year_end() {
    let contract = Contract::new("ctr-7", "cli-7", dec!(300), 3, date(2025, 11, 17));
    let schedule = InstallmentCalculator::new(360, DueDateRule::SameDayOfMonth)
        .calculate_schedule(&contract)
        .unwrap();

    let due_dates: Vec<NaiveDate> = schedule.iter().map(|i| i.due_date).collect();
    // 2026-01-17 is a Saturday
    assert_eq!(
        due_dates,
        vec![date(2025, 11, 17), date(2025, 12, 17), date(2026, 1, 16)]
    );
}

#[test]
fn test_same_day_rule_with_weekend_first_of_month() {
    // 2025-03-01 is a Saturday: the first installment moves to Monday, not February
    let start = date(2025, 3, 1);
    let contract = Contract::new("ctr-8", "cli-8", dec!(90), 3, start);
    let schedule = InstallmentCalculator::new(360, DueDateRule::SameDayOfMonth)
        .calculate_schedule(&contract)
        .unwrap();

    let due_dates: Vec<NaiveDate> = schedule.iter().map(|i| i.due_date).collect();
    assert_eq!(
        due_dates,
        vec![date(2025, 3, 3), date(2025, 4, 1), date(2025, 5, 1)]
    );
    assert!(schedule.iter().all(|i| i.due_date >= start));
}

#[test]
fn test_zero_value_contract() {
    let contract = Contract::new("ctr-0", "cli-0", dec!(0), 4, date(2025, 6, 1));
    let schedule = InstallmentCalculator::default().calculate_schedule(&contract).unwrap();

    assert_eq!(schedule.len(), 4);
    assert!(schedule.iter().all(|i| i.amount.is_zero()));
}

#[test]
fn test_invalid_contracts_are_rejected() {
    let calculator = InstallmentCalculator::default();

    let no_installments = Contract::new("ctr-1", "cli-1", dec!(100), 0, date(2025, 1, 1));
    assert!(matches!(
        calculator.calculate_schedule(&no_installments),
        Err(AppError::InvalidArgument(_))
    ));

    let negative = Contract::new("ctr-1", "cli-1", dec!(-5), 2, date(2025, 1, 1));
    assert!(matches!(
        calculator.calculate_schedule(&negative),
        Err(AppError::InvalidArgument(_))
    ));

    let too_many = Contract::new("ctr-1", "cli-1", dec!(100), 361, date(2025, 1, 1));
    assert!(matches!(
        calculator.calculate_schedule(&too_many),
        Err(AppError::InvalidArgument(_))
    ));
}

#[test]
fn test_due_dates_beyond_calendar_range() {
    let contract = Contract::new("ctr-1", "cli-1", dec!(100), 2, NaiveDate::MAX);
    assert!(matches!(
        InstallmentCalculator::default().calculate_schedule(&contract),
        Err(AppError::InvalidDate(_))
    ));
}

#[test]
fn test_calculator_from_config() {
    let config = BillingConfig {
        max_installments: 6,
        due_date_rule: DueDateRule::SameDayOfMonth,
        ..BillingConfig::default()
    };
    let calculator = InstallmentCalculator::from_config(&config);
    assert_eq!(calculator.due_date_rule(), DueDateRule::SameDayOfMonth);

    let contract = Contract::new("ctr-1", "cli-1", dec!(100), 7, date(2025, 1, 1));
    assert!(calculator.calculate_schedule(&contract).is_err());
}

#[test]
fn test_schedule_serializes_for_persistence() {
    let contract = Contract::new("ctr-9", "cli-9", dec!(10), 1, date(2025, 3, 3));
    let schedule = InstallmentCalculator::default().calculate_schedule(&contract).unwrap();

    let json = serde_json::to_value(&schedule).unwrap();
    assert_eq!(json[0]["installment_number"], 1);
    assert_eq!(json[0]["due_date"], "2025-03-31");
    assert_eq!(json[0]["status"], "pending");
}

proptest! {
    /// Property: every schedule reconciles with its contract and lands on business days
    #[test]
    fn prop_schedule_reconciles(
        total_cents in 0i64..=10_000_000i64,
        count in 1i64..=60i64,
        start_offset in 0u64..3650u64,
        same_day in any::<bool>(),
    ) {
        let total = Decimal::new(total_cents, 2);
        let start = date(2020, 1, 1) + chrono::Days::new(start_offset);
        let rule = if same_day { DueDateRule::SameDayOfMonth } else { DueDateRule::LastBusinessDayOfMonth };

        let contract = Contract::new("ctr-prop", "cli-prop", total, count, start);
        let schedule = InstallmentCalculator::new(360, rule).calculate_schedule(&contract).unwrap();

        prop_assert_eq!(schedule.len() as i64, count);
        prop_assert_eq!(euros_to_cents(schedule_total(&schedule)), total_cents);
        for installment in &schedule {
            prop_assert!(is_business_day(installment.due_date));
        }
        if same_day {
            prop_assert!(schedule[0].due_date.month() == start.month());
        }
        for pair in schedule.windows(2) {
            prop_assert!(pair[0].due_date < pair[1].due_date);
        }
    }
}
