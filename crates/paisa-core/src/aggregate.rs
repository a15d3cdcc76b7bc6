//! Spending aggregation
//!
//! Pure functions over a slice of expenses. Nothing here is cached: callers
//! recompute from the store on every render, so there is nothing to invalidate.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{
    Category, CategorySummary, DailyTotal, Expense, MonthlyTotal, SpendingSummary,
};

/// Sum of all amounts (0 for no records)
pub fn total(records: &[Expense]) -> f64 {
    records.iter().map(|e| e.amount).sum()
}

/// Total, mean and count per category, keyed (and therefore ordered) by label
///
/// Empty input yields an empty map.
pub fn by_category(records: &[Expense]) -> BTreeMap<Category, CategorySummary> {
    let mut groups: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for expense in records {
        let entry = groups.entry(expense.category).or_insert((0.0, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(category, (total, count))| {
            (
                category,
                CategorySummary {
                    category,
                    total,
                    mean: total / count as f64,
                    count,
                },
            )
        })
        .collect()
}

/// Sum per calendar date, oldest first
pub fn by_day(records: &[Expense]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for expense in records {
        *days.entry(expense.date).or_insert(0.0) += expense.amount;
    }

    days.into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Sum per calendar month, newest month first
///
/// Labels read like "February 2024". Ordering is chronological, so
/// "September 2024" comes before "March 2024" regardless of spelling.
pub fn by_month(records: &[Expense]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for expense in records {
        *months
            .entry((expense.date.year(), expense.date.month()))
            .or_insert(0.0) += expense.amount;
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), total)| MonthlyTotal {
            year,
            month,
            label: month_label(year, month),
            total,
        })
        .collect()
}

/// Category with the largest total
///
/// Ties go to the first category by label. `None` for no records.
pub fn highest_category(records: &[Expense]) -> Option<(Category, f64)> {
    let mut best: Option<(Category, f64)> = None;
    for (category, summary) in by_category(records) {
        match best {
            Some((_, amount)) if summary.total <= amount => {}
            _ => best = Some((category, summary.total)),
        }
    }
    best
}

/// Everything the advisor needs, or `None` when there is nothing to summarize
pub fn summarize(records: &[Expense]) -> Option<SpendingSummary> {
    let (highest_category, highest_amount) = highest_category(records)?;
    let category_totals = by_category(records)
        .into_values()
        .map(|s| (s.category, s.total))
        .collect();

    Some(SpendingSummary {
        total: total(records),
        highest_category,
        highest_amount,
        category_totals,
    })
}

/// Records newest first; records sharing a date keep their insertion order
pub fn sorted_by_date_desc(records: &[Expense]) -> Vec<&Expense> {
    let mut sorted: Vec<&Expense> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new(date(2024, 1, 5), Category::Groceries, 500.0, "veg"),
            Expense::new(date(2024, 1, 7), Category::Groceries, 300.0, "fruit"),
            Expense::new(date(2024, 2, 1), Category::Transportation, 100.0, "bus"),
        ]
    }

    #[test]
    fn test_total_empty() {
        assert_eq!(total(&[]), 0.0);
    }

    #[test]
    fn test_total_sample() {
        assert!((total(&sample()) - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_by_category_sample() {
        let groups = by_category(&sample());
        assert_eq!(groups.len(), 2);

        let groceries = &groups[&Category::Groceries];
        assert_eq!(groceries.total, 800.0);
        assert_eq!(groceries.mean, 400.0);
        assert_eq!(groceries.count, 2);

        let transport = &groups[&Category::Transportation];
        assert_eq!(transport.total, 100.0);
        assert_eq!(transport.count, 1);
    }

    #[test]
    fn test_by_category_empty() {
        assert!(by_category(&[]).is_empty());
    }

    #[test]
    fn test_by_category_ordered_by_label() {
        let records = vec![
            Expense::new(date(2024, 1, 1), Category::Shopping, 1.0, ""),
            Expense::new(date(2024, 1, 1), Category::Education, 1.0, ""),
            Expense::new(date(2024, 1, 1), Category::FoodAndDining, 1.0, ""),
        ];
        let order: Vec<Category> = by_category(&records).into_keys().collect();
        assert_eq!(
            order,
            vec![
                Category::Education,
                Category::FoodAndDining,
                Category::Shopping
            ]
        );
    }

    #[test]
    fn test_by_day_sums_same_date() {
        let records = vec![
            Expense::new(date(2024, 1, 7), Category::Groceries, 300.0, ""),
            Expense::new(date(2024, 1, 5), Category::Groceries, 500.0, ""),
            Expense::new(date(2024, 1, 7), Category::Shopping, 50.0, ""),
        ];
        let days = by_day(&records);
        assert_eq!(
            days,
            vec![
                DailyTotal {
                    date: date(2024, 1, 5),
                    total: 500.0
                },
                DailyTotal {
                    date: date(2024, 1, 7),
                    total: 350.0
                },
            ]
        );
    }

    #[test]
    fn test_by_month_sample() {
        let months = by_month(&sample());
        let pairs: Vec<(&str, f64)> = months.iter().map(|m| (m.label.as_str(), m.total)).collect();
        assert_eq!(pairs, vec![("February 2024", 100.0), ("January 2024", 800.0)]);
    }

    #[test]
    fn test_by_month_is_chronological_not_alphabetical() {
        let records = vec![
            Expense::new(date(2024, 3, 1), Category::Other, 1.0, ""),
            Expense::new(date(2024, 9, 1), Category::Other, 2.0, ""),
            Expense::new(date(2023, 12, 31), Category::Other, 3.0, ""),
        ];
        let labels: Vec<String> = by_month(&records).into_iter().map(|m| m.label).collect();
        assert_eq!(
            labels,
            vec!["September 2024", "March 2024", "December 2023"]
        );
    }

    #[test]
    fn test_highest_category() {
        assert_eq!(
            highest_category(&sample()),
            Some((Category::Groceries, 800.0))
        );
        assert_eq!(highest_category(&[]), None);
    }

    #[test]
    fn test_highest_category_tie_prefers_first_label() {
        let records = vec![
            Expense::new(date(2024, 1, 1), Category::Shopping, 10.0, ""),
            Expense::new(date(2024, 1, 1), Category::Housing, 10.0, ""),
        ];
        assert_eq!(
            highest_category(&records),
            Some((Category::Housing, 10.0))
        );
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&sample()).unwrap();
        assert_eq!(summary.total, 900.0);
        assert_eq!(summary.highest_category, Category::Groceries);
        assert_eq!(summary.highest_amount, 800.0);
        assert_eq!(
            summary.category_totals,
            vec![
                (Category::Groceries, 800.0),
                (Category::Transportation, 100.0)
            ]
        );
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_sorted_by_date_desc_is_stable() {
        let records = vec![
            Expense::new(date(2024, 1, 5), Category::Groceries, 1.0, "first"),
            Expense::new(date(2024, 2, 1), Category::Groceries, 2.0, "newest"),
            Expense::new(date(2024, 1, 5), Category::Groceries, 3.0, "second"),
        ];
        let sorted: Vec<&str> = sorted_by_date_desc(&records)
            .into_iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(sorted, vec!["newest", "first", "second"]);
    }
}
