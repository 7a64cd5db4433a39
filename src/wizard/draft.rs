//! The in-progress expense claim
//!
//! Every setter validates before touching state, so a draft never holds a
//! negative cost or an unsupported receipt.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{Attachment, CategoryEntry, City, ExpenseCategory, Money, TripDuration};

use super::step::WizardStep;

/// Largest cost accepted for a single category, one trillion francs
pub const MAX_CATEGORY_COST: Money = Money::from_cents(100_000_000_000_000);

/// Working state of the expense wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    step: WizardStep,
    trip_date: NaiveDate,
    destination_city: City,
    duration: TripDuration,
    hotel: CategoryEntry,
    transport: CategoryEntry,
    meals: CategoryEntry,
    other: CategoryEntry,
}

impl ExpenseDraft {
    /// Fresh draft: first step, zero costs, no receipts
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: WizardStep::default(),
            trip_date: today,
            destination_city: City::default(),
            duration: TripDuration::default(),
            hotel: CategoryEntry::default(),
            transport: CategoryEntry::default(),
            meals: CategoryEntry::default(),
            other: CategoryEntry::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub(crate) fn set_step(&mut self, step: WizardStep) {
        self.step = step;
    }

    pub fn trip_date(&self) -> NaiveDate {
        self.trip_date
    }

    pub fn destination_city(&self) -> City {
        self.destination_city
    }

    pub fn duration(&self) -> TripDuration {
        self.duration
    }

    pub fn entry(&self, category: ExpenseCategory) -> &CategoryEntry {
        match category {
            ExpenseCategory::Hotel => &self.hotel,
            ExpenseCategory::Transport => &self.transport,
            ExpenseCategory::Meals => &self.meals,
            ExpenseCategory::Other => &self.other,
        }
    }

    fn entry_mut(&mut self, category: ExpenseCategory) -> &mut CategoryEntry {
        match category {
            ExpenseCategory::Hotel => &mut self.hotel,
            ExpenseCategory::Transport => &mut self.transport,
            ExpenseCategory::Meals => &mut self.meals,
            ExpenseCategory::Other => &mut self.other,
        }
    }

    /// Sum of the four category costs
    pub fn total(&self) -> Money {
        ExpenseCategory::ALL
            .iter()
            .map(|c| self.entry(*c).cost())
            .sum()
    }

    /// Number of receipts across all categories
    pub fn attachment_count(&self) -> usize {
        ExpenseCategory::ALL
            .iter()
            .map(|c| self.entry(*c).attachments().len())
            .sum()
    }

    /// Replace a category cost; negative or oversized amounts are refused
    pub fn set_cost(&mut self, category: ExpenseCategory, cost: Money) -> TripDeskResult<()> {
        if cost.is_negative() {
            return Err(TripDeskError::Validation(format!(
                "{} cost cannot be negative ({})",
                category.label(),
                cost
            )));
        }
        if cost > MAX_CATEGORY_COST {
            return Err(TripDeskError::Validation(format!(
                "{} cost cannot exceed {} ({})",
                category.label(),
                MAX_CATEGORY_COST,
                cost
            )));
        }
        self.entry_mut(category).cost = cost;
        Ok(())
    }

    /// Append a receipt to a category
    pub fn attach(&mut self, category: ExpenseCategory, attachment: Attachment) {
        self.entry_mut(category).attachments.push(attachment);
    }

    /// Remove the receipt at `index` (0-based) from a category
    pub fn detach(&mut self, category: ExpenseCategory, index: usize) -> TripDeskResult<Attachment> {
        let entry = self.entry_mut(category);
        if index >= entry.attachments.len() {
            return Err(TripDeskError::Validation(format!(
                "{} has no receipt #{} ({} attached)",
                category.label(),
                index + 1,
                entry.attachments.len()
            )));
        }
        Ok(entry.attachments.remove(index))
    }

    /// Drop every receipt of a category
    pub fn clear_attachments(&mut self, category: ExpenseCategory) {
        self.entry_mut(category).attachments.clear();
    }

    pub fn set_trip_date(&mut self, date: NaiveDate) {
        self.trip_date = date;
    }

    pub fn set_destination_city(&mut self, city: City) {
        self.destination_city = city;
    }

    pub fn set_duration(&mut self, duration: TripDuration) {
        self.duration = duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn receipt(name: &str) -> Attachment {
        Attachment::new(name, b"receipt".to_vec()).unwrap()
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = ExpenseDraft::new(today());
        assert_eq!(draft.step(), WizardStep::Hotel);
        assert_eq!(draft.trip_date(), today());
        assert_eq!(draft.destination_city(), City::Zurich);
        assert_eq!(draft.duration(), TripDuration::default());
        assert!(draft.total().is_zero());
        assert_eq!(draft.attachment_count(), 0);
    }

    #[test]
    fn test_total_matches_example() {
        let mut draft = ExpenseDraft::new(today());
        draft.set_cost(ExpenseCategory::Hotel, Money::from_cents(12000)).unwrap();
        draft.set_cost(ExpenseCategory::Transport, Money::from_cents(4550)).unwrap();
        draft.set_cost(ExpenseCategory::Meals, Money::zero()).unwrap();
        draft.set_cost(ExpenseCategory::Other, Money::from_cents(1525)).unwrap();
        assert_eq!(draft.total(), Money::from_cents(18075));
    }

    #[test]
    fn test_negative_cost_refused_and_value_kept() {
        let mut draft = ExpenseDraft::new(today());
        draft.set_cost(ExpenseCategory::Meals, Money::from_cents(900)).unwrap();

        let err = draft
            .set_cost(ExpenseCategory::Meals, Money::from_cents(-1))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(draft.entry(ExpenseCategory::Meals).cost(), Money::from_cents(900));
    }

    #[test]
    fn test_oversized_cost_refused() {
        let mut draft = ExpenseDraft::new(today());
        let huge = Money::parse("92233720368547758").unwrap();

        assert!(draft.set_cost(ExpenseCategory::Hotel, huge).unwrap_err().is_validation());
        assert!(draft.set_cost(ExpenseCategory::Transport, huge).unwrap_err().is_validation());
        assert!(draft.total().is_zero());

        // Four maximal costs still add up
        for category in ExpenseCategory::ALL {
            draft.set_cost(category, MAX_CATEGORY_COST).unwrap();
        }
        assert_eq!(draft.total().cents(), 4 * MAX_CATEGORY_COST.cents());
    }

    #[test]
    fn test_last_write_wins() {
        let mut draft = ExpenseDraft::new(today());
        draft.set_cost(ExpenseCategory::Hotel, Money::from_cents(100)).unwrap();
        draft.set_cost(ExpenseCategory::Hotel, Money::from_cents(250)).unwrap();
        assert_eq!(draft.total(), Money::from_cents(250));
    }

    #[test]
    fn test_attach_and_detach() {
        let mut draft = ExpenseDraft::new(today());
        draft.attach(ExpenseCategory::Hotel, receipt("a.pdf"));
        draft.attach(ExpenseCategory::Hotel, receipt("b.png"));
        assert_eq!(draft.attachment_count(), 2);

        let removed = draft.detach(ExpenseCategory::Hotel, 0).unwrap();
        assert_eq!(removed.filename(), "a.pdf");
        assert_eq!(draft.entry(ExpenseCategory::Hotel).attachments()[0].filename(), "b.png");

        assert!(draft.detach(ExpenseCategory::Hotel, 5).unwrap_err().is_validation());

        draft.clear_attachments(ExpenseCategory::Hotel);
        assert_eq!(draft.attachment_count(), 0);
    }

    #[test]
    fn test_serde_round_trip_keeps_receipts() {
        let mut draft = ExpenseDraft::new(today());
        draft.set_cost(ExpenseCategory::Other, Money::from_cents(1525)).unwrap();
        draft.attach(ExpenseCategory::Other, receipt("taxi.jpg"));
        draft.set_step(WizardStep::Meals);

        let json = serde_json::to_string(&draft).unwrap();
        let back: ExpenseDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }
}
