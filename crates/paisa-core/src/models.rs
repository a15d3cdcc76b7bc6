//! Domain models for Paisa

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Spending categories offered when logging an expense
///
/// The set is closed: every expense belongs to exactly one of these labels.
/// Deserialization goes through [`FromStr`](std::str::FromStr), so labels are
/// matched without regard to case or surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Housing")]
    Housing,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Mobile & Internet")]
    MobileAndInternet,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Investment")]
    Investment,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Groceries => "Groceries",
            Self::MobileAndInternet => "Mobile & Internet",
            Self::Insurance => "Insurance",
            Self::Investment => "Investment",
            Self::Other => "Other",
        }
    }

    /// All categories in selection order
    pub fn all() -> &'static [Category] {
        &[
            Self::FoodAndDining,
            Self::Transportation,
            Self::Housing,
            Self::Utilities,
            Self::Entertainment,
            Self::Shopping,
            Self::Healthcare,
            Self::Education,
            Self::Groceries,
            Self::MobileAndInternet,
            Self::Insurance,
            Self::Investment,
            Self::Other,
        ]
    }
}

// Grouped output is ordered by label, not by selection order.
impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single logged spending event
///
/// Field names match the exported CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Description")]
    pub description: String,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category,
            amount,
            description: description.into(),
        }
    }
}

/// Per-category aggregate (recomputed on every read)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: f64,
    pub mean: f64,
    pub count: usize,
}

/// Sum of spending on one calendar date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Sum of spending in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    /// e.g. "February 2024"
    pub label: String,
    pub total: f64,
}

/// Figures handed to the advisor when building a prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub total: f64,
    pub highest_category: Category,
    pub highest_amount: f64,
    /// Category totals ordered by label
    pub category_totals: Vec<(Category, f64)>,
}

/// Format an amount in Indian Rupees, e.g. `₹1,234.50`
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}₹{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_count() {
        assert_eq!(Category::all().len(), 13);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "groceries".parse::<Category>().unwrap(),
            Category::Groceries
        );
        assert_eq!(
            "Food & Dining".parse::<Category>().unwrap(),
            Category::FoodAndDining
        );
        assert_eq!(
            " mobile & internet ".parse::<Category>().unwrap(),
            Category::MobileAndInternet
        );
        assert!("Travel".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_roundtrips_through_label() {
        for category in Category::all() {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), *category);
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_category_deserializes_like_from_str() {
        let parsed: Vec<Category> =
            serde_json::from_str(r#"["groceries", " FOOD & DINING ", "Mobile & Internet"]"#)
                .unwrap();
        assert_eq!(
            parsed,
            vec![
                Category::Groceries,
                Category::FoodAndDining,
                Category::MobileAndInternet
            ]
        );
        assert_eq!(
            serde_json::to_string(&Category::FoodAndDining).unwrap(),
            r#""Food & Dining""#
        );

        let err = serde_json::from_str::<Category>(r#""Travel""#).unwrap_err();
        assert!(err.to_string().contains("Unknown category: Travel"));
    }

    #[test]
    fn test_category_orders_by_label() {
        assert!(Category::Education < Category::FoodAndDining);
        assert!(Category::Groceries < Category::Transportation);
        assert!(Category::MobileAndInternet < Category::Other);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(5.5), "₹5.50");
        assert_eq!(format_currency(999.999), "₹1,000.00");
        assert_eq!(format_currency(1234.5), "₹1,234.50");
        assert_eq!(format_currency(1234567.891), "₹1,234,567.89");
        assert_eq!(format_currency(-250.0), "-₹250.00");
    }
}
