//! YAML Export functionality
//!
//! Exports the complete ledger to YAML format for human-readable backup.

use crate::error::TallyResult;
use crate::export::json::FullExport;
use crate::storage::Storage;
use std::io::Write;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> TallyResult<()> {
    let export = FullExport::from_storage(storage)?;

    // Add a header comment
    writeln!(writer, "# Tally Full Ledger Export")
        .map_err(|e| crate::error::TallyError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| crate::error::TallyError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| crate::error::TallyError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| crate::error::TallyError::Export(e.to_string()))?;

    // Serialize to YAML
    serde_yaml::to_writer(writer, &export)
        .map_err(|e| crate::error::TallyError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{Category, Money, Transaction, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export() {
        let (_temp_dir, storage) = create_test_storage();

        storage
            .ledger
            .upsert_category(Category::new("Salary", TransactionType::Income))
            .unwrap();
        storage
            .ledger
            .upsert_transaction(Transaction::new(
                TransactionType::Income,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                Money::from_cents(250000),
                "Salary",
            ))
            .unwrap();

        let mut yaml_output = Vec::new();
        export_full_yaml(&storage, &mut yaml_output).unwrap();

        let yaml_string = String::from_utf8(yaml_output).unwrap();

        // Verify header comments
        assert!(yaml_string.contains("# Tally Full Ledger Export"));

        // Verify data
        assert!(yaml_string.contains("Salary"));
        assert!(yaml_string.contains("transaction_count: 1"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();

        storage
            .ledger
            .upsert_category(Category::new("Food", TransactionType::Expense))
            .unwrap();

        let mut yaml_output = Vec::new();
        export_full_yaml(&storage, &mut yaml_output).unwrap();

        let yaml_string = String::from_utf8(yaml_output).unwrap();

        // Skip the comment lines for parsing
        let yaml_content: String = yaml_string
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");

        let imported: FullExport = serde_yaml::from_str(&yaml_content).unwrap();

        assert_eq!(imported.categories.len(), 1);
        assert_eq!(imported.categories[0].name, "Food");
    }
}
