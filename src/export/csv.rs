//! CSV Export functionality
//!
//! Exports transaction data to CSV format.

use crate::error::{TallyError, TallyResult};
use crate::storage::Storage;
use std::io::Write;

/// Export all transactions to CSV
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: &mut W) -> TallyResult<()> {
    let transactions = storage.ledger.get_all_transactions()?;

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID",
            "Date",
            "Type",
            "Category",
            "Amount",
            "Description",
            "Created At",
        ])
        .map_err(|e| TallyError::Export(e.to_string()))?;

    for txn in transactions {
        let id = txn.id.as_uuid().to_string();
        let date = txn.date.to_string();
        let amount = format!("{:.2}", txn.amount.cents() as f64 / 100.0);
        let created_at = txn.created_at.to_rfc3339();

        csv_writer
            .write_record([
                id.as_str(),
                date.as_str(),
                txn.kind.as_str(),
                txn.category.as_str(),
                amount.as_str(),
                txn.description.as_str(),
                created_at.as_str(),
            ])
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{Money, Transaction, TransactionType};
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
    fn test_export_transactions_csv() {
        let (_temp_dir, storage) = create_test_storage();

        storage
            .ledger
            .upsert_transaction(Transaction::with_details(
                TransactionType::Expense,
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                Money::from_cents(5000),
                "Food",
                "lunch, plus coffee",
            ))
            .unwrap();

        let mut csv_output = Vec::new();
        export_transactions_csv(&storage, &mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.starts_with("ID,Date,Type,Category,Amount,Description,Created At\n"));
        assert!(csv_string.contains("2025-01-15,expense,Food,50.00"));
        // Embedded comma gets quoted
        assert!(csv_string.contains("\"lunch, plus coffee\""));
    }

    #[test]
    fn test_export_empty_ledger() {
        let (_temp_dir, storage) = create_test_storage();

        let mut csv_output = Vec::new();
        export_transactions_csv(&storage, &mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert_eq!(csv_string.lines().count(), 1);
    }
}
