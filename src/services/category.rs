//! Category service
//!
//! Provides business logic for category management. Category names are
//! matched by string, so nothing here stops two categories from sharing a
//! name and deleting a category never touches the transactions naming it.

use crate::error::{TallyError, TallyResult};
use crate::models::{Category, CategoryId, TransactionType};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, name: &str, kind: TransactionType) -> TallyResult<Category> {
        let name = name.trim();

        let category = Category::new(name, kind);
        category
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        // Save
        self.storage.ledger.upsert_category(category.clone())?;
        self.storage.ledger.save()?;

        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> TallyResult<Option<Category>> {
        self.storage.ledger.get_category(id)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> TallyResult<Option<Category>> {
        self.storage.ledger.get_category_by_name(name)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> TallyResult<Option<Category>> {
        // Try by name first
        if let Some(category) = self.storage.ledger.get_category_by_name(identifier)? {
            return Ok(Some(category));
        }

        // Try parsing as ID
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.storage.ledger.get_category(id)? {
                return Ok(Some(category));
            }
        }

        // Fall back to the short display form, e.g. "cat-1a2b3c4d"
        let needle = identifier
            .strip_prefix("cat-")
            .unwrap_or(identifier)
            .to_lowercase();
        if needle.len() < 4 || !needle.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Ok(None);
        }

        let mut matches = self
            .storage
            .ledger
            .get_all_categories()?
            .into_iter()
            .filter(|c| c.id.as_uuid().to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(category), None) => Ok(Some(category)),
            _ => Ok(None),
        }
    }

    /// List all categories, income first
    pub fn list(&self) -> TallyResult<Vec<Category>> {
        self.storage.ledger.get_all_categories()
    }

    /// List categories of one type, sorted by name
    pub fn list_by_kind(&self, kind: TransactionType) -> TallyResult<Vec<Category>> {
        self.storage.ledger.get_categories_by_kind(kind)
    }

    /// Update a category
    ///
    /// Only the supplied fields change; the ID and creation timestamp are
    /// never touched. Transactions keep whatever category name they were
    /// recorded with.
    pub fn update(
        &self,
        id: CategoryId,
        name: Option<&str>,
        kind: Option<TransactionType>,
    ) -> TallyResult<Category> {
        let mut category = self
            .storage
            .ledger
            .get_category(id)?
            .ok_or_else(|| TallyError::category_not_found(id.to_string()))?;

        if let Some(new_name) = name {
            category.name = new_name.trim().to_string();
        }

        if let Some(new_kind) = kind {
            category.kind = new_kind;
        }

        category
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.ledger.upsert_category(category.clone())?;
        self.storage.ledger.save()?;

        Ok(category)
    }

    /// Rename a category
    pub fn rename(&self, id: CategoryId, name: &str) -> TallyResult<Category> {
        self.update(id, Some(name), None)
    }

    /// Delete a category, returning the removed record
    pub fn delete(&self, id: CategoryId) -> TallyResult<Category> {
        let category = self
            .storage
            .ledger
            .get_category(id)?
            .ok_or_else(|| TallyError::category_not_found(id.to_string()))?;

        self.storage.ledger.delete_category(id)?;
        self.storage.ledger.save()?;

        Ok(category)
    }

    /// Count categories
    pub fn count(&self) -> TallyResult<usize> {
        self.storage.ledger.category_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{Money, Transaction};
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
    fn test_create_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create("  Food ", TransactionType::Expense).unwrap();
        assert_eq!(category.name, "Food");
        assert_eq!(category.kind, TransactionType::Expense);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let result = service.create("   ", TransactionType::Expense);
        assert!(matches!(result, Err(TallyError::Validation(_))));
    }

    #[test]
    fn test_duplicate_names_permitted() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let first = service.create("Food", TransactionType::Expense).unwrap();
        let second = service.create("Food", TransactionType::Expense).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.count().unwrap(), 2);
    }

    #[test]
    fn test_list_by_kind() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create("Salary", TransactionType::Income).unwrap();
        service.create("Food", TransactionType::Expense).unwrap();
        service.create("Utilities", TransactionType::Expense).unwrap();

        let expenses = service.list_by_kind(TransactionType::Expense).unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].name, "Food");
        assert_eq!(expenses[1].name, "Utilities");

        assert_eq!(service.list().unwrap().len(), 3);
    }

    #[test]
    fn test_update_preserves_identity() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create("Food", TransactionType::Expense).unwrap();

        let renamed = service.update(category.id, Some("Groceries"), None).unwrap();
        assert_eq!(renamed.name, "Groceries");
        assert_eq!(renamed.kind, TransactionType::Expense);
        assert_eq!(renamed.id, category.id);
        assert_eq!(renamed.created_at, category.created_at);

        let retyped = service
            .update(category.id, None, Some(TransactionType::Income))
            .unwrap();
        assert_eq!(retyped.name, "Groceries");
        assert_eq!(retyped.kind, TransactionType::Income);
    }

    #[test]
    fn test_delete_leaves_transactions_alone() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create("Food", TransactionType::Expense).unwrap();

        let txn = Transaction::new(
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            Money::from_cents(1200),
            "Food",
        );
        let txn_id = txn.id;
        storage.ledger.upsert_transaction(txn).unwrap();

        let removed = service.delete(category.id).unwrap();
        assert_eq!(removed.id, category.id);
        assert!(service.get(category.id).unwrap().is_none());

        // The transaction still names the deleted category
        let orphan = storage.ledger.get_transaction(txn_id).unwrap().unwrap();
        assert_eq!(orphan.category, "Food");
    }

    #[test]
    fn test_find_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create("Dining Out", TransactionType::Expense).unwrap();

        // Find by name (case insensitive)
        let found = service.find("dining out").unwrap().unwrap();
        assert_eq!(found.id, category.id);

        // Find by short display form
        let found = service.find(&category.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, category.id);

        assert!(service.find("missing").unwrap().is_none());
    }
}
