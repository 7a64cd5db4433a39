//! Receipt file store
//!
//! Committed receipts are written to
//! `data/attachments/exp-<uuid>/<category>/<nn>-<filename>`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TripDeskError;
use crate::models::{Attachment, ExpenseCategory, ExpenseId, StoredAttachment};

use super::file_io::write_bytes_atomic;

/// Writes and removes committed receipt files
pub struct AttachmentStore {
    root: PathBuf,
}

impl AttachmentStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every receipt of one expense
    pub fn expense_dir(&self, expense_id: ExpenseId) -> PathBuf {
        self.root.join(dir_name(expense_id))
    }

    /// Absolute location of a stored receipt
    pub fn resolve(&self, stored: &StoredAttachment) -> PathBuf {
        self.root.join(&stored.path)
    }

    /// Write one receipt; `position` keeps equal filenames apart
    pub fn store(
        &self,
        expense_id: ExpenseId,
        category: ExpenseCategory,
        position: usize,
        attachment: &Attachment,
    ) -> Result<StoredAttachment, TripDeskError> {
        let file_name = format!("{:02}-{}", position + 1, sanitize(attachment.filename()));
        let relative = PathBuf::from(dir_name(expense_id))
            .join(category.key())
            .join(file_name);

        write_bytes_atomic(&self.root.join(&relative), attachment.bytes())?;

        Ok(StoredAttachment {
            filename: attachment.filename().to_string(),
            kind: attachment.kind(),
            size: attachment.size() as u64,
            path: relative.to_string_lossy().replace('\\', "/"),
        })
    }

    /// Remove every receipt of an expense; missing directories are fine
    pub fn remove_expense(&self, expense_id: ExpenseId) -> Result<(), TripDeskError> {
        let dir = self.expense_dir(expense_id);
        if !dir.exists() {
            return Ok(());
        }
        fs::remove_dir_all(&dir).map_err(|e| {
            TripDeskError::Storage(format!("Failed to remove {}: {}", dir.display(), e))
        })
    }
}

/// `exp-` followed by the full UUID
fn dir_name(expense_id: ExpenseId) -> String {
    format!("exp-{}", expense_id.as_uuid())
}

/// Keep filenames portable: ASCII letters, digits, `.`, `-` and `_`
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "receipt".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("hotel bill (1).pdf"), "hotel_bill__1_.pdf");
        assert_eq!(sanitize("Zürich.png"), "Z_rich.png");
        assert_eq!(sanitize(".."), "receipt");
    }

    #[test]
    fn test_store_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = AttachmentStore::new(temp_dir.path().to_path_buf());
        let expense_id = ExpenseId::new();
        let receipt = Attachment::new("ticket.pdf", b"%PDF-1.7".to_vec()).unwrap();

        let first = store
            .store(expense_id, ExpenseCategory::Transport, 0, &receipt)
            .unwrap();
        let second = store
            .store(expense_id, ExpenseCategory::Transport, 1, &receipt)
            .unwrap();

        assert_ne!(first.path, second.path);
        assert!(first.path.ends_with("transport/01-ticket.pdf"));
        assert_eq!(first.size, 8);
        assert_eq!(fs::read(store.resolve(&first)).unwrap(), b"%PDF-1.7");

        store.remove_expense(expense_id).unwrap();
        assert!(!store.expense_dir(expense_id).exists());
        store.remove_expense(expense_id).unwrap();
    }
}
