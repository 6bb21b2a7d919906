//! Storage layer for Tally
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. All records live in a single ledger document.

pub mod file_io;
pub mod init;
pub mod ledger;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use ledger::LedgerRepository;

use crate::config::paths::TallyPaths;
use crate::error::TallyError;

/// Main storage coordinator that owns the ledger repository
pub struct Storage {
    paths: TallyPaths,
    pub ledger: LedgerRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.ledger_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TallyError> {
        self.ledger.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TallyError> {
        self.ledger.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.ledger_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_and_save_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        storage
            .ledger
            .upsert_category(crate::models::Category::new(
                "Food",
                crate::models::TransactionType::Expense,
            ))
            .unwrap();
        storage.save_all().unwrap();
        assert!(storage.is_initialized());

        let paths2 = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage2 = Storage::new(paths2).unwrap();
        storage2.load_all().unwrap();
        assert_eq!(storage2.ledger.category_count().unwrap(), 1);
    }
}
