//! Expense repository for JSON storage
//!
//! Manages loading and saving committed expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TripDeskError;
use crate::models::{Expense, ExpenseId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), TripDeskError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk in creation order
    pub fn save(&self) -> Result<(), TripDeskError> {
        let file_data = ExpenseData {
            expenses: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all expenses, oldest first
    pub fn get_all(&self) -> Result<Vec<Expense>, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by_key(|e| e.created_at);
        Ok(expenses)
    }

    /// Get all expenses filed by a user, oldest first
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<Expense>, TripDeskError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| e.user_id == user_id)
            .collect())
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), TripDeskError> {
        let mut data = self.data.write().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Remove an expense from memory; used to roll back a failed save
    pub fn remove(&self, id: ExpenseId) -> Result<bool, TripDeskError> {
        let mut data = self.data.write().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
