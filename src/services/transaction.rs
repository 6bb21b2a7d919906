//! Transaction service
//!
//! Provides business logic for transaction management including CRUD
//! operations, filtering, and validation.

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, Transaction, TransactionId, TransactionType};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by transaction type
    pub kind: Option<TransactionType>,
    /// Filter by category name (case-insensitive)
    pub category: Option<String>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by transaction type
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by category name
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub amount: Money,
    pub category: String,
    pub description: Option<String>,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> TallyResult<Transaction> {
        let category = input.category.trim().to_string();

        let mut txn = Transaction::new(input.kind, input.date, input.amount, category);

        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }

        // Validate
        txn.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        // Save transaction
        self.storage.ledger.upsert_transaction(txn.clone())?;
        self.storage.ledger.save()?;

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        self.storage.ledger.get_transaction(id)
    }

    /// Find a transaction by identifier string
    ///
    /// Accepts a full UUID (with or without the `txn-` prefix) or the short
    /// display form. A short prefix that matches more than one transaction
    /// resolves to nothing.
    pub fn find(&self, identifier: &str) -> TallyResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            if let Some(txn) = self.storage.ledger.get_transaction(id)? {
                return Ok(Some(txn));
            }
        }

        let needle = identifier
            .strip_prefix("txn-")
            .unwrap_or(identifier)
            .to_lowercase();
        if needle.len() < 4 || !needle.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Ok(None);
        }

        let mut matches = self
            .storage
            .ledger
            .get_all_transactions()?
            .into_iter()
            .filter(|t| t.id.as_uuid().to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn)),
            _ => Ok(None),
        }
    }

    /// List transactions with optional filtering, newest first
    pub fn list(&self, filter: TransactionFilter) -> TallyResult<Vec<Transaction>> {
        let mut transactions = self.storage.ledger.get_all_transactions()?;

        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }
        if let Some(category) = &filter.category {
            let category_lower = category.to_lowercase();
            transactions.retain(|t| t.category.to_lowercase() == category_lower);
        }
        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }

        // Apply limit
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Update a transaction
    ///
    /// Only the supplied fields change; the ID and creation timestamp are
    /// never touched.
    pub fn update(
        &self,
        id: TransactionId,
        kind: Option<TransactionType>,
        date: Option<NaiveDate>,
        amount: Option<Money>,
        category: Option<String>,
        description: Option<String>,
    ) -> TallyResult<Transaction> {
        let mut txn = self
            .storage
            .ledger
            .get_transaction(id)?
            .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

        // Apply updates
        if let Some(new_kind) = kind {
            txn.kind = new_kind;
        }

        if let Some(new_date) = date {
            txn.date = new_date;
        }

        if let Some(new_amount) = amount {
            txn.amount = new_amount;
        }

        if let Some(new_category) = category {
            txn.category = new_category.trim().to_string();
        }

        if let Some(new_description) = description {
            txn.description = new_description.trim().to_string();
        }

        // Validate
        txn.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        // Save
        self.storage.ledger.upsert_transaction(txn.clone())?;
        self.storage.ledger.save()?;

        Ok(txn)
    }

    /// Delete a transaction, returning the removed record
    pub fn delete(&self, id: TransactionId) -> TallyResult<Transaction> {
        let txn = self
            .storage
            .ledger
            .get_transaction(id)?
            .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

        self.storage.ledger.delete_transaction(id)?;
        self.storage.ledger.save()?;

        Ok(txn)
    }

    /// Count transactions
    pub fn count(&self) -> TallyResult<usize> {
        self.storage.ledger.transaction_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn expense_input(day: u32, cents: i64, category: &str) -> CreateTransactionInput {
        CreateTransactionInput {
            kind: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            amount: Money::from_cents(cents),
            category: category.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_create_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let input = CreateTransactionInput {
            kind: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            amount: Money::from_cents(5000),
            category: "  Food ".to_string(),
            description: Some("Weekly groceries".to_string()),
        };

        let txn = service.create(input).unwrap();

        assert_eq!(txn.amount.cents(), 5000);
        assert_eq!(txn.category, "Food");
        assert_eq!(txn.description, "Weekly groceries");
        assert_eq!(txn.kind, TransactionType::Expense);
    }

    #[test]
    fn test_create_rejects_negative_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let result = service.create(expense_input(15, -5000, "Food"));
        assert!(matches!(result, Err(TallyError::Validation(_))));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_create_rejects_empty_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let result = service.create(expense_input(15, 5000, "   "));
        assert!(matches!(result, Err(TallyError::Validation(_))));
    }

    #[test]
    fn test_list_transactions() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(expense_input(1, 1000, "Food")).unwrap();
        service.create(expense_input(2, 2000, "Transportation")).unwrap();
        service
            .create(CreateTransactionInput {
                kind: TransactionType::Income,
                date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                amount: Money::from_cents(300000),
                category: "Salary".to_string(),
                description: None,
            })
            .unwrap();

        let all = service.list(TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 3);

        // Newest first
        assert_eq!(all[0].date, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());

        // Filter by type
        let income = service
            .list(TransactionFilter::new().kind(TransactionType::Income))
            .unwrap();
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].category, "Salary");

        // Filter by category, case-insensitive
        let food = service
            .list(TransactionFilter::new().category("food"))
            .unwrap();
        assert_eq!(food.len(), 1);

        // Limit results
        let limited = service.list(TransactionFilter::new().limit(2)).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_list_date_range() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        for day in [5, 10, 20] {
            service.create(expense_input(day, 1000, "Food")).unwrap();
        }

        let ranged = service
            .list(TransactionFilter::new().date_range(
                NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            ))
            .unwrap();
        assert_eq!(ranged.len(), 1);
        assert_eq!(ranged[0].date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn test_update_preserves_identity() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(CreateTransactionInput {
                kind: TransactionType::Expense,
                date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                amount: Money::from_cents(5000),
                category: "Food".to_string(),
                description: Some("original".to_string()),
            })
            .unwrap();

        let updated = service
            .update(
                txn.id,
                None,
                None,
                Some(Money::from_cents(7500)),
                None,
                Some("updated".to_string()),
            )
            .unwrap();

        // Only the supplied fields change
        assert_eq!(updated.amount.cents(), 7500);
        assert_eq!(updated.description, "updated");
        assert_eq!(updated.date, txn.date);
        assert_eq!(updated.category, "Food");
        assert_eq!(updated.kind, TransactionType::Expense);

        // Identity preserved
        assert_eq!(updated.id, txn.id);
        assert_eq!(updated.created_at, txn.created_at);
    }

    #[test]
    fn test_update_missing_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let result = service.update(TransactionId::new(), None, None, None, None, None);
        assert!(matches!(result, Err(TallyError::NotFound { .. })));
    }

    #[test]
    fn test_delete_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let keep = service.create(expense_input(1, 1000, "Food")).unwrap();
        let doomed = service.create(expense_input(2, 2000, "Food")).unwrap();
        assert_eq!(service.count().unwrap(), 2);

        let removed = service.delete(doomed.id).unwrap();
        assert_eq!(removed.id, doomed.id);
        assert_eq!(service.count().unwrap(), 1);
        assert!(service.get(keep.id).unwrap().is_some());

        // Deleting again reports not found
        let result = service.delete(doomed.id);
        assert!(matches!(result, Err(TallyError::NotFound { .. })));
    }

    #[test]
    fn test_find_by_short_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service.create(expense_input(1, 1000, "Food")).unwrap();

        // Full UUID
        let found = service.find(&txn.id.as_uuid().to_string()).unwrap();
        assert_eq!(found.unwrap().id, txn.id);

        // Short display form
        let found = service.find(&txn.id.to_string()).unwrap();
        assert_eq!(found.unwrap().id, txn.id);

        // Nonsense
        assert!(service.find("not-an-id").unwrap().is_none());
    }
}
