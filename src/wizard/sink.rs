//! Commit target of the wizard

use crate::error::TripDeskResult;
use crate::models::{Expense, Money, UserId};

use super::draft::ExpenseDraft;

/// Everything handed over when a draft is committed
#[derive(Debug, Clone, Copy)]
pub struct ExpenseSubmission<'a> {
    pub user_id: UserId,
    pub draft: &'a ExpenseDraft,
    pub total_cost: Money,
}

/// Persists a committed expense and triggers model retraining
///
/// Implementations either store the whole submission and return the new
/// record, or fail without leaving partial output behind.
pub trait ExpenseSink {
    fn persist_and_retrain(&self, submission: ExpenseSubmission<'_>) -> TripDeskResult<Expense>;
}
