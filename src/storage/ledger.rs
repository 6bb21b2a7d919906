//! Ledger repository for JSON storage
//!
//! Transactions and categories live together in one document, ledger.json,
//! shaped `{ "transactions": [...], "categories": [...] }`. Every save
//! rewrites the whole document atomically.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TallyError;
use crate::models::{Category, CategoryId, Transaction, TransactionId, TransactionType};

use super::file_io::{read_json, write_json_atomic};

/// Serializable ledger document
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct LedgerData {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

/// Repository for transaction and category persistence
pub struct LedgerRepository {
    path: PathBuf,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl LedgerRepository {
    /// Create a new ledger repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            transactions: RwLock::new(HashMap::new()),
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load the ledger from disk. A missing file loads as an empty ledger.
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: LedgerData = read_json(&self.path)?;

        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut categories = self
            .categories
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        transactions.clear();
        categories.clear();

        for txn in file_data.transactions {
            transactions.insert(txn.id, txn);
        }

        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save the ledger to disk
    pub fn save(&self) -> Result<(), TallyError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let categories = self
            .categories
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        // Deterministic order keeps the document diffable
        let mut transaction_list: Vec<_> = transactions.values().cloned().collect();
        transaction_list.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.as_uuid().cmp(b.id.as_uuid()))
        });

        let mut category_list: Vec<_> = categories.values().cloned().collect();
        category_list.sort_by(|a, b| {
            a.kind
                .as_str()
                .cmp(b.kind.as_str())
                .then(a.name.cmp(&b.name))
        });

        let file_data = LedgerData {
            transactions: transaction_list,
            categories: category_list,
        };

        write_json_atomic(&self.path, &file_data)
    }

    // Transaction operations

    /// Get a transaction by ID
    pub fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, TallyError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(transactions.get(&id).cloned())
    }

    /// Get all transactions, newest first (date, then creation time)
    pub fn get_all_transactions(&self) -> Result<Vec<Transaction>, TallyError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = transactions.values().cloned().collect();
        list.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(list)
    }

    /// Insert or update a transaction
    pub fn upsert_transaction(&self, txn: Transaction) -> Result<(), TallyError> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        transactions.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction. Returns whether a record was removed.
    pub fn delete_transaction(&self, id: TransactionId) -> Result<bool, TallyError> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(transactions.remove(&id).is_some())
    }

    /// Count transactions
    pub fn transaction_count(&self) -> Result<usize, TallyError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(transactions.len())
    }

    // Category operations

    /// Get a category by ID
    pub fn get_category(&self, id: CategoryId) -> Result<Option<Category>, TallyError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.get(&id).cloned())
    }

    /// Get all categories, income first, sorted by name within a type
    pub fn get_all_categories(&self) -> Result<Vec<Category>, TallyError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| {
            b.kind
                .as_str()
                .cmp(a.kind.as_str())
                .then(a.name.cmp(&b.name))
        });
        Ok(list)
    }

    /// Get all categories of one type, sorted by name
    pub fn get_categories_by_kind(
        &self,
        kind: TransactionType,
    ) -> Result<Vec<Category>, TallyError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories
            .values()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Get a category by name (case-insensitive). Names are not unique, so
    /// this returns the first match in name order.
    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>, TallyError> {
        let name_lower = name.to_lowercase();
        Ok(self
            .get_all_categories()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == name_lower))
    }

    /// Insert or update a category
    pub fn upsert_category(&self, category: Category) -> Result<(), TallyError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category. Returns whether a record was removed.
    ///
    /// Transactions naming the category are left alone; their category
    /// strings simply dangle afterwards.
    pub fn delete_category(&self, id: CategoryId) -> Result<bool, TallyError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(categories.remove(&id).is_some())
    }

    /// Count categories
    pub fn category_count(&self) -> Result<usize, TallyError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(categories.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, LedgerRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let repo = LedgerRepository::new(path);
        (temp_dir, repo)
    }

    fn sample_txn(day: u32, cents: i64) -> Transaction {
        Transaction::new(
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            Money::from_cents(cents),
            "Food",
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.transaction_count().unwrap(), 0);
        assert_eq!(repo.category_count().unwrap(), 0);
    }

    #[test]
    fn test_transaction_operations() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let txn = sample_txn(10, 2500);
        let id = txn.id;

        repo.upsert_transaction(txn).unwrap();
        assert_eq!(repo.transaction_count().unwrap(), 1);

        let retrieved = repo.get_transaction(id).unwrap().unwrap();
        assert_eq!(retrieved.amount, Money::from_cents(2500));

        assert!(repo.delete_transaction(id).unwrap());
        assert_eq!(repo.transaction_count().unwrap(), 0);
        assert!(!repo.delete_transaction(id).unwrap());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let keep1 = sample_txn(1, 100);
        let doomed = sample_txn(2, 200);
        let keep2 = sample_txn(3, 300);
        let doomed_id = doomed.id;
        let keep_ids = [keep1.id, keep2.id];

        repo.upsert_transaction(keep1).unwrap();
        repo.upsert_transaction(doomed).unwrap();
        repo.upsert_transaction(keep2).unwrap();

        assert!(repo.delete_transaction(doomed_id).unwrap());
        assert_eq!(repo.transaction_count().unwrap(), 2);
        for id in keep_ids {
            assert!(repo.get_transaction(id).unwrap().is_some());
        }
    }

    #[test]
    fn test_category_operations() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let category = Category::new("Food", TransactionType::Expense);
        let cat_id = category.id;

        repo.upsert_category(category).unwrap();
        assert_eq!(repo.category_count().unwrap(), 1);

        let retrieved = repo.get_category(cat_id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Food");

        let by_kind = repo
            .get_categories_by_kind(TransactionType::Expense)
            .unwrap();
        assert_eq!(by_kind.len(), 1);
        assert!(repo
            .get_categories_by_kind(TransactionType::Income)
            .unwrap()
            .is_empty());

        assert!(repo.delete_category(cat_id).unwrap());
        assert_eq!(repo.category_count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let txn = sample_txn(10, 2500);
        let txn_id = txn.id;
        let category = Category::new("Food", TransactionType::Expense);
        let cat_id = category.id;

        repo.upsert_transaction(txn).unwrap();
        repo.upsert_category(category).unwrap();
        repo.save().unwrap();

        let repo2 = LedgerRepository::new(temp_dir.path().join("ledger.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.transaction_count().unwrap(), 1);
        assert_eq!(repo2.category_count().unwrap(), 1);
        assert!(repo2.get_transaction(txn_id).unwrap().is_some());
        assert!(repo2.get_category(cat_id).unwrap().is_some());
    }

    #[test]
    fn test_single_document_shape() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert_transaction(sample_txn(10, 2500)).unwrap();
        repo.upsert_category(Category::new("Food", TransactionType::Expense))
            .unwrap();
        repo.save().unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("ledger.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert!(value.get("transactions").unwrap().is_array());
        assert!(value.get("categories").unwrap().is_array());
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_get_all_transactions_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert_transaction(sample_txn(5, 100)).unwrap();
        repo.upsert_transaction(sample_txn(20, 200)).unwrap();
        repo.upsert_transaction(sample_txn(12, 300)).unwrap();

        let all = repo.get_all_transactions().unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            ]
        );
    }

    #[test]
    fn test_get_category_by_name_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert_category(Category::new("Transportation", TransactionType::Expense))
            .unwrap();

        let found = repo.get_category_by_name("TRANSPORTATION").unwrap();
        assert!(found.is_some());
        assert!(repo.get_category_by_name("Missing").unwrap().is_none());
    }
}
