//! Expense categories, draft entries and the persisted expense record

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::attachment::{Attachment, MimeKind};
use super::city::City;
use super::duration::TripDuration;
use super::ids::{ExpenseId, UserId};
use super::money::Money;

/// The four fixed expense buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Hotel,
    Transport,
    Meals,
    Other,
}

impl ExpenseCategory {
    /// All categories in wizard order
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Hotel,
        ExpenseCategory::Transport,
        ExpenseCategory::Meals,
        ExpenseCategory::Other,
    ];

    /// Lowercase key used in paths and exports
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Transport => "transport",
            Self::Meals => "meals",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hotel => "Hotel",
            Self::Transport => "Transportation",
            Self::Meals => "Meals",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hotel" => Ok(Self::Hotel),
            "transport" | "transportation" => Ok(Self::Transport),
            "meals" | "meal" => Ok(Self::Meals),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "Unknown expense category '{}'. Valid categories: hotel, transport, meals, other",
                other
            )),
        }
    }
}

/// Cost and receipts collected for one category inside a draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Never negative; enforced by the draft setters
    pub(crate) cost: Money,

    #[serde(default)]
    pub(crate) attachments: Vec<Attachment>,
}

impl CategoryEntry {
    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Where a committed receipt was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAttachment {
    pub filename: String,
    pub kind: MimeKind,
    pub size: u64,
    /// Relative to the attachments directory
    pub path: String,
}

/// Committed cost and receipts for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category: ExpenseCategory,
    pub cost: Money,
    #[serde(default)]
    pub attachments: Vec<StoredAttachment>,
}

/// A persisted post-trip expense claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub trip_date: NaiveDate,
    pub destination_city: City,
    pub duration: TripDuration,
    /// Sum of the category costs at commit time
    pub total_cost: Money,
    pub categories: Vec<CategoryRecord>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Committed record for a category, if present
    pub fn category(&self, category: ExpenseCategory) -> Option<&CategoryRecord> {
        self.categories.iter().find(|r| r.category == category)
    }

    /// Total number of receipts across categories
    pub fn attachment_count(&self) -> usize {
        self.categories.iter().map(|r| r.attachments.len()).sum()
    }

    /// Recompute the total from the category records
    pub fn category_sum(&self) -> Money {
        self.categories.iter().map(|r| r.cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Hotel".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Hotel);
        assert_eq!(
            "transportation".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Transport
        );
        assert!("fuel".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_category_order() {
        let keys: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["hotel", "transport", "meals", "other"]);
    }

    #[test]
    fn test_expense_category_sum() {
        let expense = Expense {
            id: ExpenseId::new(),
            user_id: UserId::new(1),
            trip_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            destination_city: City::Basel,
            duration: TripDuration::from_days(2),
            total_cost: Money::from_cents(16550),
            categories: vec![
                CategoryRecord {
                    category: ExpenseCategory::Hotel,
                    cost: Money::from_cents(12000),
                    attachments: vec![],
                },
                CategoryRecord {
                    category: ExpenseCategory::Transport,
                    cost: Money::from_cents(4550),
                    attachments: vec![],
                },
            ],
            created_at: Utc::now(),
        };

        assert_eq!(expense.category_sum(), expense.total_cost);
        assert!(expense.category(ExpenseCategory::Meals).is_none());
        assert_eq!(expense.attachment_count(), 0);
    }
}
