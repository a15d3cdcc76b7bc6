//! Session-scoped expense store
//!
//! Holds the expenses logged during one session, in insertion order.
//! There is no persistence, removal or editing: records only ever get appended.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Category, Expense};

/// Ordered, append-only collection of expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    records: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-parsed records (e.g. a loaded CSV export)
    ///
    /// Every record goes through the same checks as [`ExpenseStore::add_expense`].
    pub fn from_records(records: Vec<Expense>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            validate_amount(record.amount)
                .map_err(|e| Error::InvalidData(format!("record {}: {}", i + 1, e)))?;
        }
        Ok(Self { records })
    }

    /// Append one expense to the end of the store
    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: impl Into<String>,
    ) -> Result<&Expense> {
        validate_amount(amount)?;

        let expense = Expense::new(date, category, amount, description);
        info!(
            date = %expense.date,
            category = %expense.category,
            amount = expense.amount,
            "Expense added"
        );
        self.records.push(expense);

        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// All records in insertion order
    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ExpenseStore {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::InvalidData(format!(
            "amount must be a finite number, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "amount must not be negative, got {}",
            amount
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ExpenseStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_add_expense_preserves_insertion_order() {
        let mut store = ExpenseStore::new();
        store
            .add_expense(date(2024, 2, 1), Category::Transportation, 100.0, "bus")
            .unwrap();
        store
            .add_expense(date(2024, 1, 5), Category::Groceries, 500.0, "veg")
            .unwrap();

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "bus");
        assert_eq!(records[1].description, "veg");
    }

    #[test]
    fn test_add_expense_returns_stored_record() {
        let mut store = ExpenseStore::new();
        let added = store
            .add_expense(date(2024, 1, 7), Category::Groceries, 300.0, "fruit")
            .unwrap();
        assert_eq!(added.amount, 300.0);
        assert_eq!(added.category, Category::Groceries);
    }

    #[test]
    fn test_zero_amount_allowed() {
        let mut store = ExpenseStore::new();
        assert!(store
            .add_expense(date(2024, 1, 1), Category::Other, 0.0, "")
            .is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut store = ExpenseStore::new();
        let result = store.add_expense(date(2024, 1, 1), Category::Other, -1.0, "refund");
        assert!(matches!(result, Err(Error::InvalidData(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let mut store = ExpenseStore::new();
        assert!(store
            .add_expense(date(2024, 1, 1), Category::Other, f64::NAN, "")
            .is_err());
        assert!(store
            .add_expense(date(2024, 1, 1), Category::Other, f64::INFINITY, "")
            .is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_from_records_validates() {
        let good = vec![Expense::new(date(2024, 1, 1), Category::Housing, 10.0, "rent")];
        assert_eq!(ExpenseStore::from_records(good).unwrap().len(), 1);

        let bad = vec![
            Expense::new(date(2024, 1, 1), Category::Housing, 10.0, "rent"),
            Expense::new(date(2024, 1, 2), Category::Housing, -5.0, "oops"),
        ];
        let err = ExpenseStore::from_records(bad).unwrap_err();
        assert!(err.to_string().contains("record 2"));
    }

    #[test]
    fn test_iterates_by_reference() {
        let mut store = ExpenseStore::new();
        store
            .add_expense(date(2024, 1, 1), Category::Housing, 10.0, "a")
            .unwrap();
        store
            .add_expense(date(2024, 1, 2), Category::Housing, 20.0, "b")
            .unwrap();

        let sum: f64 = (&store).into_iter().map(|e| e.amount).sum();
        assert_eq!(sum, 30.0);
        assert_eq!(store.iter().count(), 2);
    }
}
