//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::DefaultCategory;

use super::file_io::write_json_atomic;
use super::ledger::LedgerData;

/// Initialize storage for a fresh installation
///
/// Creates the data directory and seeds the starter categories
pub fn initialize_storage(paths: &TallyPaths) -> Result<(), TallyError> {
    // Ensure all directories exist
    paths.ensure_directories()?;

    // Seed default categories if ledger.json doesn't exist
    if !paths.ledger_file().exists() {
        create_default_categories(paths)?;
    }

    Ok(())
}

/// Create the starter set of income and expense categories
fn create_default_categories(paths: &TallyPaths) -> Result<(), TallyError> {
    let categories = DefaultCategory::all()
        .iter()
        .map(|d| d.to_category())
        .collect();

    let data = LedgerData {
        transactions: Vec::new(),
        categories,
    };
    write_json_atomic(paths.ledger_file(), &data)?;

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TallyPaths) -> bool {
    !paths.ledger_file().exists()
}
