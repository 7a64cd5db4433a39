//! Expense wizard session controller
//!
//! Loads a user's wizard from the session store, applies exactly one action
//! and writes it back. Editing actions require the wizard to be open.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{Attachment, City, Expense, ExpenseCategory, Money, TripDuration, UserId};
use crate::storage::Storage;
use crate::wizard::{ExpenseSink, ExpenseWizard};

use super::expense::ExpenseService;

/// Service driving one user's expense wizard
pub struct ExpenseWizardService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

impl<'a> ExpenseWizardService<'a> {
    /// `today` seeds the trip date of fresh drafts
    pub fn new(storage: &'a Storage, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    /// Current wizard of a user; a hidden default one if none was saved yet
    pub fn load(&self, user_id: UserId) -> TripDeskResult<ExpenseWizard> {
        if !self.storage.users.exists(user_id)? {
            return Err(TripDeskError::user_not_found(user_id.to_string()));
        }
        Ok(self
            .storage
            .sessions
            .load(user_id)?
            .unwrap_or_else(|| ExpenseWizard::new(self.today)))
    }

    fn update<T>(
        &self,
        user_id: UserId,
        action: impl FnOnce(&mut ExpenseWizard) -> TripDeskResult<T>,
    ) -> TripDeskResult<(T, ExpenseWizard)> {
        let mut wizard = self.load(user_id)?;
        let value = action(&mut wizard)?;
        self.storage.sessions.save(user_id, &wizard)?;
        Ok((value, wizard))
    }

    fn edit<T>(
        &self,
        user_id: UserId,
        action: impl FnOnce(&mut ExpenseWizard) -> TripDeskResult<T>,
    ) -> TripDeskResult<(T, ExpenseWizard)> {
        self.update(user_id, |wizard| {
            ensure_open(wizard)?;
            action(wizard)
        })
    }

    /// Show the wizard, resuming the saved draft
    pub fn open(&self, user_id: UserId) -> TripDeskResult<ExpenseWizard> {
        let ((), wizard) = self.update(user_id, |w| {
            w.open();
            Ok(())
        })?;
        debug!(user = %user_id, step = wizard.step().number(), "wizard opened");
        Ok(wizard)
    }

    /// Hide the wizard; the draft is kept
    pub fn close(&self, user_id: UserId) -> TripDeskResult<ExpenseWizard> {
        let ((), wizard) = self.update(user_id, |w| {
            w.close();
            Ok(())
        })?;
        Ok(wizard)
    }

    pub fn next(&self, user_id: UserId) -> TripDeskResult<ExpenseWizard> {
        self.edit(user_id, |w| Ok(w.next())).map(|(_, w)| w)
    }

    pub fn back(&self, user_id: UserId) -> TripDeskResult<ExpenseWizard> {
        self.edit(user_id, |w| Ok(w.back())).map(|(_, w)| w)
    }

    pub fn set_cost(
        &self,
        user_id: UserId,
        category: ExpenseCategory,
        cost: Money,
    ) -> TripDeskResult<ExpenseWizard> {
        self.edit(user_id, |w| w.set_cost(category, cost)).map(|(_, w)| w)
    }

    /// Read receipt files and attach them; nothing is attached if any file is refused
    pub fn attach<P: AsRef<Path>>(
        &self,
        user_id: UserId,
        category: ExpenseCategory,
        files: &[P],
    ) -> TripDeskResult<ExpenseWizard> {
        self.edit(user_id, |w| {
            let attachments = files
                .iter()
                .map(|f| read_attachment(f.as_ref()))
                .collect::<TripDeskResult<Vec<_>>>()?;
            for attachment in attachments {
                w.attach(category, attachment);
            }
            Ok(())
        })
        .map(|(_, w)| w)
    }

    /// Remove the receipt at `index` (0-based); returns the removed receipt
    pub fn detach(
        &self,
        user_id: UserId,
        category: ExpenseCategory,
        index: usize,
    ) -> TripDeskResult<(Attachment, ExpenseWizard)> {
        self.edit(user_id, |w| w.detach(category, index))
    }

    pub fn clear_attachments(
        &self,
        user_id: UserId,
        category: ExpenseCategory,
    ) -> TripDeskResult<ExpenseWizard> {
        self.edit(user_id, |w| {
            w.clear_attachments(category);
            Ok(())
        })
        .map(|(_, w)| w)
    }

    pub fn set_trip_date(&self, user_id: UserId, date: NaiveDate) -> TripDeskResult<ExpenseWizard> {
        self.edit(user_id, |w| {
            w.set_trip_date(date);
            Ok(())
        })
        .map(|(_, w)| w)
    }

    pub fn set_destination_city(&self, user_id: UserId, city: City) -> TripDeskResult<ExpenseWizard> {
        self.edit(user_id, |w| {
            w.set_destination_city(city);
            Ok(())
        })
        .map(|(_, w)| w)
    }

    pub fn set_duration(
        &self,
        user_id: UserId,
        duration: TripDuration,
    ) -> TripDeskResult<ExpenseWizard> {
        self.edit(user_id, |w| {
            w.set_duration(duration);
            Ok(())
        })
        .map(|(_, w)| w)
    }

    /// Commit through the local expense store
    pub fn commit(&self, user_id: UserId) -> TripDeskResult<Expense> {
        self.commit_to(&ExpenseService::new(self.storage), user_id)
    }

    /// Commit through any sink; on failure the saved session stays as it was
    ///
    /// Once the sink has accepted the expense the commit counts as done. If
    /// the reset draft cannot be saved, the session file is removed instead
    /// so that a retry cannot file the same expense twice.
    pub fn commit_to<S>(&self, sink: &S, user_id: UserId) -> TripDeskResult<Expense>
    where
        S: ExpenseSink + ?Sized,
    {
        let mut wizard = self.load(user_id)?;
        ensure_open(&wizard)?;
        let expense = wizard.commit(sink, user_id, self.today)?;

        if let Err(e) = self.storage.sessions.save(user_id, &wizard) {
            warn!(user = %user_id, expense = %expense.id, error = %e, "could not save reset session");
            if let Err(e) = self.storage.sessions.remove(user_id) {
                warn!(user = %user_id, error = %e, "could not remove stale session");
            }
        }
        Ok(expense)
    }
}

fn ensure_open(wizard: &ExpenseWizard) -> TripDeskResult<()> {
    if wizard.is_open() {
        Ok(())
    } else {
        Err(TripDeskError::Precondition(
            "The expense wizard is closed. Run `tripdesk expense open` first.".into(),
        ))
    }
}

/// Load a receipt from disk
pub fn read_attachment(path: &Path) -> TripDeskResult<Attachment> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    // Check the kind before reading possibly large files
    let probe = Attachment::new(name, Vec::new())
        .map_err(|e| TripDeskError::Validation(e.to_string()))?;

    let bytes = fs::read(path)
        .map_err(|e| TripDeskError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    Attachment::new(probe.filename(), bytes).map_err(|e| TripDeskError::Validation(e.to_string()))
}
