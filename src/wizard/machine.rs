//! Expense wizard state machine
//!
//! Hotel → Transport → Meals → Other → Review. Next and Back move one step
//! and clamp at the ends. Close only hides the panel; the draft survives
//! until a successful commit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{Attachment, City, Expense, ExpenseCategory, Money, TripDuration, UserId};

use super::draft::ExpenseDraft;
use super::sink::{ExpenseSink, ExpenseSubmission};
use super::step::WizardStep;

/// One user's wizard: panel visibility plus the draft behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseWizard {
    visible: bool,
    draft: ExpenseDraft,
}

impl ExpenseWizard {
    /// A hidden wizard holding a fresh draft
    pub fn new(today: NaiveDate) -> Self {
        Self {
            visible: false,
            draft: ExpenseDraft::new(today),
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Show the panel, resuming wherever the draft was left
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Hide the panel; nothing is reset
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn step(&self) -> WizardStep {
        self.draft.step()
    }

    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }

    /// Move forward one step; a no-op on Review
    pub fn next(&mut self) -> WizardStep {
        let step = self.draft.step().next();
        self.draft.set_step(step);
        debug!(step = step.number(), "wizard next");
        step
    }

    /// Move back one step; a no-op on Hotel
    pub fn back(&mut self) -> WizardStep {
        let step = self.draft.step().prev();
        self.draft.set_step(step);
        debug!(step = step.number(), "wizard back");
        step
    }

    pub fn set_cost(&mut self, category: ExpenseCategory, cost: Money) -> TripDeskResult<()> {
        self.draft.set_cost(category, cost)
    }

    pub fn attach(&mut self, category: ExpenseCategory, attachment: Attachment) {
        self.draft.attach(category, attachment);
    }

    pub fn detach(&mut self, category: ExpenseCategory, index: usize) -> TripDeskResult<Attachment> {
        self.draft.detach(category, index)
    }

    pub fn clear_attachments(&mut self, category: ExpenseCategory) {
        self.draft.clear_attachments(category);
    }

    pub fn set_trip_date(&mut self, date: NaiveDate) {
        self.draft.set_trip_date(date);
    }

    pub fn set_destination_city(&mut self, city: City) {
        self.draft.set_destination_city(city);
    }

    pub fn set_duration(&mut self, duration: TripDuration) {
        self.draft.set_duration(duration);
    }

    /// Current sum of the four category costs
    pub fn total(&self) -> Money {
        self.draft.total()
    }

    /// Hand the draft to `sink`; only allowed on the Review step
    ///
    /// On success the draft is replaced by a fresh one and the panel is
    /// hidden. On failure nothing changes, so the user can retry.
    pub fn commit<S>(&mut self, sink: &S, user_id: UserId, today: NaiveDate) -> TripDeskResult<Expense>
    where
        S: ExpenseSink + ?Sized,
    {
        if !self.draft.step().is_review() {
            return Err(TripDeskError::Precondition(format!(
                "Expenses can only be saved from the review step (currently on step {})",
                self.draft.step().number()
            )));
        }

        let total_cost = self.draft.total();
        let submission = ExpenseSubmission {
            user_id,
            draft: &self.draft,
            total_cost,
        };

        match sink.persist_and_retrain(submission) {
            Ok(expense) => {
                info!(expense = %expense.id, user = %user_id, total = %total_cost, "expense committed");
                self.draft = ExpenseDraft::new(today);
                self.visible = false;
                Ok(expense)
            }
            Err(err) => {
                warn!(user = %user_id, error = %err, "expense commit failed; draft kept");
                Err(match err {
                    TripDeskError::CommitFailed(_) => err,
                    other => TripDeskError::CommitFailed(other.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRecord, ExpenseId};
    use chrono::Utc;
    use std::cell::RefCell;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    /// Sink that records submitted totals
    #[derive(Default)]
    struct RecordingSink {
        totals: RefCell<Vec<Money>>,
    }

    impl ExpenseSink for RecordingSink {
        fn persist_and_retrain(&self, submission: ExpenseSubmission<'_>) -> TripDeskResult<Expense> {
            self.totals.borrow_mut().push(submission.total_cost);
            let draft = submission.draft;
            Ok(Expense {
                id: ExpenseId::new(),
                user_id: submission.user_id,
                trip_date: draft.trip_date(),
                destination_city: draft.destination_city(),
                duration: draft.duration(),
                total_cost: submission.total_cost,
                categories: ExpenseCategory::ALL
                    .iter()
                    .map(|c| CategoryRecord {
                        category: *c,
                        cost: draft.entry(*c).cost(),
                        attachments: vec![],
                    })
                    .collect(),
                created_at: Utc::now(),
            })
        }
    }

    struct FailingSink;

    impl ExpenseSink for FailingSink {
        fn persist_and_retrain(&self, _submission: ExpenseSubmission<'_>) -> TripDeskResult<Expense> {
            Err(TripDeskError::Storage("database unreachable".into()))
        }
    }

    fn wizard_on_review() -> ExpenseWizard {
        let mut wizard = ExpenseWizard::new(today());
        wizard.open();
        wizard.set_cost(ExpenseCategory::Hotel, Money::from_cents(12000)).unwrap();
        wizard.next();
        wizard.set_cost(ExpenseCategory::Transport, Money::from_cents(4550)).unwrap();
        wizard.attach(
            ExpenseCategory::Transport,
            Attachment::new("train.pdf", b"%PDF".to_vec()).unwrap(),
        );
        wizard.next();
        wizard.next();
        wizard.set_cost(ExpenseCategory::Other, Money::from_cents(1525)).unwrap();
        wizard.next();
        wizard
    }

    #[test]
    fn test_back_on_first_step_is_noop() {
        let mut wizard = ExpenseWizard::new(today());
        assert_eq!(wizard.back(), WizardStep::Hotel);
        assert_eq!(wizard.step().number(), 1);
    }

    #[test]
    fn test_next_on_review_is_noop() {
        let mut wizard = wizard_on_review();
        assert_eq!(wizard.step(), WizardStep::Review);
        assert_eq!(wizard.next(), WizardStep::Review);
        assert_eq!(wizard.step().number(), 5);
    }

    #[test]
    fn test_close_and_reopen_preserves_everything() {
        let mut wizard = ExpenseWizard::new(today());
        wizard.open();
        wizard.set_cost(ExpenseCategory::Hotel, Money::from_cents(9900)).unwrap();
        wizard.set_destination_city(City::Lugano);
        wizard.set_duration(TripDuration::from_half_days(3));
        wizard.next();
        wizard.next();
        let before = wizard.draft().clone();

        wizard.close();
        assert!(!wizard.is_open());
        wizard.open();

        assert!(wizard.is_open());
        assert_eq!(wizard.draft(), &before);
        assert_eq!(wizard.step(), WizardStep::Meals);
    }

    #[test]
    fn test_trip_fields_editable_on_any_step() {
        let mut wizard = ExpenseWizard::new(today());
        wizard.next();
        wizard.next();
        wizard.set_destination_city(City::Bern);
        wizard.next();
        wizard.next();
        assert_eq!(wizard.draft().destination_city(), City::Bern);
    }

    #[test]
    fn test_commit_outside_review_refused() {
        let mut wizard = ExpenseWizard::new(today());
        wizard.open();
        let sink = RecordingSink::default();

        let err = wizard.commit(&sink, UserId::new(1), today()).unwrap_err();

        assert!(err.is_precondition());
        assert!(sink.totals.borrow().is_empty());
        assert!(wizard.is_open());
    }

    #[test]
    fn test_commit_success_resets_and_hides() {
        let mut wizard = wizard_on_review();
        let sink = RecordingSink::default();
        let next_day = today().succ_opt().unwrap();

        let expense = wizard.commit(&sink, UserId::new(1), next_day).unwrap();

        assert_eq!(expense.total_cost, Money::from_cents(18075));
        assert_eq!(sink.totals.borrow().as_slice(), &[Money::from_cents(18075)]);
        assert!(!wizard.is_open());
        assert_eq!(wizard.step(), WizardStep::Hotel);
        assert!(wizard.total().is_zero());
        assert_eq!(wizard.draft().attachment_count(), 0);
        assert_eq!(wizard.draft().trip_date(), next_day);
    }

    #[test]
    fn test_commit_failure_keeps_draft_unchanged() {
        let mut wizard = wizard_on_review();
        let before = wizard.clone();

        let err = wizard.commit(&FailingSink, UserId::new(1), today()).unwrap_err();

        assert!(err.is_retryable());
        assert!(err.to_string().contains("database unreachable"));
        assert_eq!(wizard, before);
    }

    #[test]
    fn test_total_independent_of_visit_order() {
        let mut wizard = ExpenseWizard::new(today());
        // Jump around and overwrite values before reaching review
        wizard.next();
        wizard.next();
        wizard.set_cost(ExpenseCategory::Meals, Money::from_cents(3000)).unwrap();
        wizard.back();
        wizard.back();
        wizard.set_cost(ExpenseCategory::Hotel, Money::from_cents(12000)).unwrap();
        wizard.next();
        wizard.set_cost(ExpenseCategory::Transport, Money::from_cents(4550)).unwrap();
        wizard.next();
        wizard.set_cost(ExpenseCategory::Meals, Money::zero()).unwrap();
        wizard.next();
        wizard.set_cost(ExpenseCategory::Other, Money::from_cents(1525)).unwrap();
        wizard.back();
        wizard.next();
        wizard.next();

        let sink = RecordingSink::default();
        let expense = wizard.commit(&sink, UserId::new(2), today()).unwrap();
        assert_eq!(expense.total_cost, Money::from_cents(18075));
        assert_eq!(expense.category_sum(), expense.total_cost);
    }
}
