//! Property-based tests for the aggregation and CSV layers

use chrono::NaiveDate;
use paisa_core::{
    aggregate,
    export::{export_csv, import_csv},
    Category, Expense,
};
use proptest::prelude::*;

fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::all().to_vec())
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2026, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Whole-rupee amounts keep every sum exact in f64
fn arb_whole_expense() -> impl Strategy<Value = Expense> {
    (arb_date(), arb_category(), 0u32..100_000, "[a-z ]{0,12}").prop_map(
        |(date, category, amount, description)| {
            Expense::new(date, category, amount as f64, description)
        },
    )
}

/// Paise-precision amounts and descriptions that need CSV quoting
fn arb_exported_expense() -> impl Strategy<Value = Expense> {
    (
        arb_date(),
        arb_category(),
        0u64..10_000_000,
        "[A-Za-z0-9 ,\"'&₹-]{0,24}",
    )
        .prop_map(|(date, category, paise, description)| {
            Expense::new(date, category, paise as f64 / 100.0, description)
        })
}

proptest! {
    #[test]
    fn test_total_is_additive(
        a in prop::collection::vec(arb_whole_expense(), 0..30),
        b in prop::collection::vec(arb_whole_expense(), 0..30),
    ) {
        let mut joined = a.clone();
        joined.extend(b.iter().cloned());

        prop_assert_eq!(
            aggregate::total(&joined),
            aggregate::total(&a) + aggregate::total(&b)
        );
    }
}

proptest! {
    #[test]
    fn test_category_totals_partition_total(
        records in prop::collection::vec(arb_whole_expense(), 0..40),
    ) {
        let categories = aggregate::by_category(&records);

        let sum: f64 = categories.values().map(|c| c.total).sum();
        prop_assert_eq!(sum, aggregate::total(&records));

        let count: usize = categories.values().map(|c| c.count).sum();
        prop_assert_eq!(count, records.len());

        for summary in categories.values() {
            prop_assert!(summary.count > 0);
            prop_assert!((summary.mean * summary.count as f64 - summary.total).abs() < 1e-6);
        }

        // Keys come out ordered by label
        let labels: Vec<&str> = categories.keys().map(|c| c.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        prop_assert_eq!(labels, sorted);
    }
}

proptest! {
    #[test]
    fn test_months_unique_and_descending(
        records in prop::collection::vec(arb_whole_expense(), 0..40),
    ) {
        let months = aggregate::by_month(&records);

        for pair in months.windows(2) {
            prop_assert!((pair[0].year, pair[0].month) > (pair[1].year, pair[1].month));
            prop_assert_ne!(&pair[0].label, &pair[1].label);
        }

        let sum: f64 = months.iter().map(|m| m.total).sum();
        prop_assert_eq!(sum, aggregate::total(&records));
    }
}

proptest! {
    #[test]
    fn test_days_ascending_and_complete(
        records in prop::collection::vec(arb_whole_expense(), 0..40),
    ) {
        let days = aggregate::by_day(&records);

        for pair in days.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }

        let sum: f64 = days.iter().map(|d| d.total).sum();
        prop_assert_eq!(sum, aggregate::total(&records));
    }
}

proptest! {
    #[test]
    fn test_csv_round_trip(
        records in prop::collection::vec(arb_exported_expense(), 0..25),
    ) {
        let csv = export_csv(&records).expect("export failed");
        prop_assert!(csv.starts_with("Date,Category,Amount,Description"));

        let parsed = import_csv(csv.as_bytes()).expect("import failed");
        prop_assert_eq!(parsed, records);
    }
}

#[test]
fn test_total_of_nothing_is_zero() {
    assert_eq!(aggregate::total(&[]), 0.0);
}
