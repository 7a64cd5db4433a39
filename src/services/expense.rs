//! Expense service
//!
//! The shipped [`ExpenseSink`]: writes receipts to the attachment store,
//! appends the expense to expenses.json, audits the creation and finally asks
//! the [`Retrainer`] to retrain. Any failure rolls every step back.

use chrono::Utc;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{CategoryRecord, Expense, ExpenseCategory, ExpenseId, UserId};
use crate::storage::Storage;
use crate::wizard::{ExpenseSink, ExpenseSubmission};

/// Consumer of newly committed expenses that keeps the model up to date
pub trait Retrainer {
    fn request_retrain(&self, expense: &Expense) -> TripDeskResult<()>;
}

/// Retraining requests are queued as audit entries
impl Retrainer for AuditLogger {
    fn request_retrain(&self, expense: &Expense) -> TripDeskResult<()> {
        self.log(&AuditEntry::retrain(
            EntityType::Expense,
            expense.id.to_string(),
            format!("expense model: new record for {}", expense.destination_city),
        ))
    }
}

/// Service for committed expenses
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    retrainer: &'a dyn Retrainer,
}

impl<'a> ExpenseService<'a> {
    /// Create an expense service that retrains through the audit log
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            retrainer: storage.audit(),
        }
    }

    /// Create an expense service with a custom retraining hook
    pub fn with_retrainer(storage: &'a Storage, retrainer: &'a dyn Retrainer) -> Self {
        Self { storage, retrainer }
    }

    /// All expenses of a user, oldest first
    pub fn list(&self, user_id: UserId) -> TripDeskResult<Vec<Expense>> {
        self.storage.expenses.get_by_user(user_id)
    }

    /// Find a user's expense by full ID or by its short `exp-xxxxxxxx` form
    pub fn find(&self, user_id: UserId, identifier: &str) -> TripDeskResult<Option<Expense>> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return Ok(self
                .storage
                .expenses
                .get(id)?
                .filter(|e| e.user_id == user_id));
        }

        let short = identifier.strip_prefix("exp-").unwrap_or(identifier).to_lowercase();
        if short.is_empty() {
            return Ok(None);
        }

        let mut matches: Vec<Expense> = self
            .list(user_id)?
            .into_iter()
            .filter(|e| e.id.as_uuid().to_string().starts_with(&short))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(TripDeskError::Validation(format!(
                "Expense ID '{}' is ambiguous; use more characters",
                identifier
            ))),
        }
    }

    fn persist(&self, id: ExpenseId, submission: ExpenseSubmission<'_>) -> TripDeskResult<Expense> {
        if !self.storage.users.exists(submission.user_id)? {
            return Err(TripDeskError::user_not_found(submission.user_id.to_string()));
        }

        let draft = submission.draft;
        let mut categories = Vec::with_capacity(ExpenseCategory::ALL.len());
        for category in ExpenseCategory::ALL {
            let entry = draft.entry(category);
            let attachments = entry
                .attachments()
                .iter()
                .enumerate()
                .map(|(position, attachment)| {
                    self.storage.attachments.store(id, category, position, attachment)
                })
                .collect::<TripDeskResult<Vec<_>>>()?;

            categories.push(CategoryRecord {
                category,
                cost: entry.cost(),
                attachments,
            });
        }

        let expense = Expense {
            id,
            user_id: submission.user_id,
            trip_date: draft.trip_date(),
            destination_city: draft.destination_city(),
            duration: draft.duration(),
            total_cost: submission.total_cost,
            categories,
            created_at: Utc::now(),
        };

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        debug!(expense = %expense.id, receipts = expense.attachment_count(), "expense stored");

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(format!("{} {}", expense.destination_city, expense.trip_date)),
            &expense,
        )?;

        // Last, so a retrain is never requested for an expense that is rolled back
        self.retrainer.request_retrain(&expense)?;

        Ok(expense)
    }

    /// Undo whatever part of a commit already happened
    fn rollback(&self, id: ExpenseId, cause: &TripDeskError) {
        match self.storage.expenses.remove(id) {
            Ok(true) => {
                if let Err(e) = self.storage.expenses.save() {
                    warn!(expense = %id, error = %e, "could not rewrite expenses after rollback");
                }
                let entry = AuditEntry::rollback(
                    EntityType::Expense,
                    id.to_string(),
                    format!("commit failed: {}", cause),
                );
                if let Err(e) = self.storage.audit().log(&entry) {
                    warn!(expense = %id, error = %e, "could not audit rollback");
                }
            }
            Ok(false) => {}
            Err(e) => warn!(expense = %id, error = %e, "could not roll back expense record"),
        }

        if let Err(e) = self.storage.attachments.remove_expense(id) {
            warn!(expense = %id, error = %e, "could not remove receipts after rollback");
        }
    }
}

impl ExpenseSink for ExpenseService<'_> {
    fn persist_and_retrain(&self, submission: ExpenseSubmission<'_>) -> TripDeskResult<Expense> {
        let id = ExpenseId::new();
        self.persist(id, submission).map_err(|e| {
            self.rollback(id, &e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::TripDeskPaths;
    use crate::models::{Attachment, City, Money};
    use crate::services::UserService;
    use crate::wizard::ExpenseDraft;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    struct BrokenRetrainer;

    impl Retrainer for BrokenRetrainer {
        fn request_retrain(&self, _expense: &Expense) -> TripDeskResult<()> {
            Err(TripDeskError::Storage("model service unavailable".into()))
        }
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripDeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn sample_draft() -> ExpenseDraft {
        let mut draft = ExpenseDraft::new(NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
        draft.set_destination_city(City::Geneva);
        draft.set_cost(ExpenseCategory::Hotel, Money::from_cents(12000)).unwrap();
        draft.set_cost(ExpenseCategory::Transport, Money::from_cents(4550)).unwrap();
        draft.set_cost(ExpenseCategory::Other, Money::from_cents(1525)).unwrap();
        draft.attach(
            ExpenseCategory::Hotel,
            Attachment::new("hotel.pdf", b"%PDF-1.4 hotel".to_vec()).unwrap(),
        );
        draft.attach(
            ExpenseCategory::Transport,
            Attachment::new("train.jpg", vec![0xFF, 0xD8, 0xFF]).unwrap(),
        );
        draft
    }

    fn submission(user_id: UserId, draft: &ExpenseDraft) -> ExpenseSubmission<'_> {
        ExpenseSubmission {
            user_id,
            draft,
            total_cost: draft.total(),
        }
    }

    #[test]
    fn test_persist_stores_expense_receipts_and_audit() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserService::new(&storage).create("Anna Keller").unwrap();
        let draft = sample_draft();
        let service = ExpenseService::new(&storage);

        let expense = service.persist_and_retrain(submission(user.id, &draft)).unwrap();

        assert_eq!(expense.total_cost, Money::from_cents(18075));
        assert_eq!(expense.category_sum(), expense.total_cost);
        assert_eq!(expense.attachment_count(), 2);
        assert_eq!(expense.categories.len(), 4);

        let hotel = expense.category(ExpenseCategory::Hotel).unwrap();
        let stored = storage.attachments.resolve(&hotel.attachments[0]);
        assert_eq!(std::fs::read(stored).unwrap(), b"%PDF-1.4 hotel");

        assert_eq!(service.list(user.id).unwrap(), vec![expense.clone()]);

        let operations: Vec<_> = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .filter(|e| e.entity_type == EntityType::Expense)
            .map(|e| e.operation)
            .collect();
        assert_eq!(operations, vec![Operation::Create, Operation::Retrain]);
    }

    #[test]
    fn test_failed_retrain_leaves_nothing_behind() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserService::new(&storage).create("Anna Keller").unwrap();
        let draft = sample_draft();
        let service = ExpenseService::with_retrainer(&storage, &BrokenRetrainer);

        let err = service.persist_and_retrain(submission(user.id, &draft)).unwrap_err();

        assert!(err.to_string().contains("model service unavailable"));
        assert_eq!(storage.expenses.count().unwrap(), 0);
        let leftovers = std::fs::read_dir(storage.attachments.root()).unwrap().count();
        assert_eq!(leftovers, 0);

        // Nothing was written to disk either
        storage.expenses.load().unwrap();
        assert_eq!(storage.expenses.count().unwrap(), 0);

        // No retrain was recorded, and the create entry is withdrawn
        let operations: Vec<_> = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .filter(|e| e.entity_type == EntityType::Expense)
            .map(|e| e.operation)
            .collect();
        assert_eq!(operations, vec![Operation::Create, Operation::Rollback]);
    }

    #[test]
    fn test_unknown_user_refused() {
        let (_temp_dir, storage) = create_test_storage();
        let draft = sample_draft();

        let err = ExpenseService::new(&storage)
            .persist_and_retrain(submission(UserId::new(99), &draft))
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(std::fs::read_dir(storage.attachments.root()).unwrap().count(), 0);
    }

    #[test]
    fn test_find_by_short_and_full_id() {
        let (_temp_dir, storage) = create_test_storage();
        let users = UserService::new(&storage);
        let anna = users.create("Anna Keller").unwrap();
        let marc = users.create("Marc Weber").unwrap();
        let draft = sample_draft();
        let service = ExpenseService::new(&storage);

        let expense = service.persist_and_retrain(submission(anna.id, &draft)).unwrap();

        let by_short = service.find(anna.id, &expense.id.to_string()).unwrap();
        assert_eq!(by_short.as_ref().map(|e| e.id), Some(expense.id));

        let full = expense.id.as_uuid().to_string();
        assert!(service.find(anna.id, &full).unwrap().is_some());

        // Other users cannot see it
        assert!(service.find(marc.id, &full).unwrap().is_none());
        assert!(service.find(anna.id, "exp-").unwrap().is_none());
    }
}
