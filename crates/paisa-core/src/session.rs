//! One user session: the expense store plus the advisor that reads it

use chrono::NaiveDate;

use crate::advisor::{AdviceOutcome, Advisor};
use crate::aggregate;
use crate::error::Result;
use crate::export;
use crate::models::{Category, CategorySummary, DailyTotal, Expense, MonthlyTotal};
use crate::store::ExpenseStore;

/// Owns everything that lives for the length of a session
///
/// Aggregates are recomputed from the store on every call.
pub struct Session {
    store: ExpenseStore,
    advisor: Advisor,
}

impl Session {
    pub fn new(advisor: Advisor) -> Self {
        Self::with_store(ExpenseStore::new(), advisor)
    }

    /// Start from existing records (e.g. a loaded CSV export)
    pub fn with_store(store: ExpenseStore, advisor: Advisor) -> Self {
        Self { store, advisor }
    }

    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: &str,
    ) -> Result<&Expense> {
        self.store.add_expense(date, category, amount, description)
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn advisor(&self) -> &Advisor {
        &self.advisor
    }

    pub fn total(&self) -> f64 {
        aggregate::total(self.store.records())
    }

    pub fn by_category(&self) -> Vec<CategorySummary> {
        aggregate::by_category(self.store.records())
            .into_values()
            .collect()
    }

    pub fn by_day(&self) -> Vec<DailyTotal> {
        aggregate::by_day(self.store.records())
    }

    pub fn by_month(&self) -> Vec<MonthlyTotal> {
        aggregate::by_month(self.store.records())
    }

    pub fn export_csv(&self) -> Result<String> {
        export::export_csv(self.store.records())
    }

    pub async fn advice(&mut self) -> AdviceOutcome {
        self.advisor.advise(self.store.records()).await
    }
}
