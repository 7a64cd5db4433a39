//! Wizard steps

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ExpenseCategory;

/// Number of steps in the wizard
pub const STEP_COUNT: u8 = 5;

/// The five ordered wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Hotel,
    Transport,
    Meals,
    Other,
    Review,
}

impl WizardStep {
    /// Following step; stays on Review
    pub fn next(self) -> Self {
        match self {
            Self::Hotel => Self::Transport,
            Self::Transport => Self::Meals,
            Self::Meals => Self::Other,
            Self::Other | Self::Review => Self::Review,
        }
    }

    /// Preceding step; stays on Hotel
    pub fn prev(self) -> Self {
        match self {
            Self::Hotel | Self::Transport => Self::Hotel,
            Self::Meals => Self::Transport,
            Self::Other => Self::Meals,
            Self::Review => Self::Other,
        }
    }

    /// 1-based position, as shown in "Expense 2 of 5"
    pub fn number(self) -> u8 {
        match self {
            Self::Hotel => 1,
            Self::Transport => 2,
            Self::Meals => 3,
            Self::Other => 4,
            Self::Review => 5,
        }
    }

    /// Category edited on this step; `None` on Review
    pub fn category(self) -> Option<ExpenseCategory> {
        match self {
            Self::Hotel => Some(ExpenseCategory::Hotel),
            Self::Transport => Some(ExpenseCategory::Transport),
            Self::Meals => Some(ExpenseCategory::Meals),
            Self::Other => Some(ExpenseCategory::Other),
            Self::Review => None,
        }
    }

    pub fn is_first(self) -> bool {
        self == Self::Hotel
    }

    pub fn is_review(self) -> bool {
        self == Self::Review
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.category() {
            Some(category) => category.label(),
            None => "Review",
        };
        write!(f, "Expense {} of {}: {}", self.number(), STEP_COUNT, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_in_order_and_clamps() {
        let mut step = WizardStep::Hotel;
        let mut seen = vec![step.number()];
        for _ in 0..6 {
            step = step.next();
            seen.push(step.number());
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 5, 5]);
    }

    #[test]
    fn test_prev_walks_back_and_clamps() {
        let mut step = WizardStep::Review;
        let mut seen = vec![step.number()];
        for _ in 0..6 {
            step = step.prev();
            seen.push(step.number());
        }
        assert_eq!(seen, vec![5, 4, 3, 2, 1, 1, 1]);
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(WizardStep::Meals.category(), Some(ExpenseCategory::Meals));
        assert_eq!(WizardStep::Review.category(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(WizardStep::Transport.to_string(), "Expense 2 of 5: Transportation");
        assert_eq!(WizardStep::Review.to_string(), "Expense 5 of 5: Review");
    }
}
