//! Ledger summary
//!
//! Aggregates the ledger into overall totals and per-category activity.
//! Transactions are matched to categories by type and case-insensitive
//! name. A name with no matching category still gets an activity row, so
//! every transaction is counted exactly once and the per-type subtotals
//! always add up to that type's total.

use std::collections::HashMap;

use crate::error::TallyResult;
use crate::models::{Category, CategoryId, Money, Transaction, TransactionType};
use crate::storage::Storage;

/// One category's transactions and subtotal
#[derive(Debug, Clone)]
pub struct CategoryActivity {
    /// Category ID, absent when no category matches the recorded name
    pub category_id: Option<CategoryId>,
    /// Category name as displayed
    pub name: String,
    /// Transaction type this row belongs to
    pub kind: TransactionType,
    /// Sum of the transaction amounts
    pub subtotal: Money,
    /// The category's transactions, newest first
    pub transactions: Vec<Transaction>,
}

/// Ledger summary
#[derive(Debug, Clone)]
pub struct LedgerSummary {
    /// Sum of all income amounts
    pub total_income: Money,
    /// Sum of all expense amounts
    pub total_expense: Money,
    /// Income minus expenses
    pub balance: Money,
    /// Per-category activity, income first, names sorted within a type
    pub activity: Vec<CategoryActivity>,
    /// Total transaction count
    pub transaction_count: usize,
}

/// Sum the amounts of one transaction type
pub fn total_for(transactions: &[Transaction], kind: TransactionType) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

impl LedgerSummary {
    /// Generate a summary from storage
    pub fn generate(storage: &Storage) -> TallyResult<Self> {
        let transactions = storage.ledger.get_all_transactions()?;
        let categories = storage.ledger.get_all_categories()?;
        Ok(Self::from_parts(transactions, &categories))
    }

    /// Build a summary from already-loaded records
    pub fn from_parts(transactions: Vec<Transaction>, categories: &[Category]) -> Self {
        let total_income = total_for(&transactions, TransactionType::Income);
        let total_expense = total_for(&transactions, TransactionType::Expense);
        let transaction_count = transactions.len();
        let activity = build_activity(transactions, categories);

        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            activity,
            transaction_count,
        }
    }

    /// Activity rows for one transaction type
    pub fn activity_for(&self, kind: TransactionType) -> impl Iterator<Item = &CategoryActivity> {
        self.activity.iter().filter(move |a| a.kind == kind)
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Ledger Summary\n");
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!("Total Income:   {}\n", self.total_income));
        output.push_str(&format!("Total Expenses: {}\n", self.total_expense));
        output.push_str(&format!("Balance:        {}\n", self.balance));
        output.push_str(&format!("Transactions:   {}\n", self.transaction_count));

        for kind in TransactionType::all() {
            let rows: Vec<_> = self.activity_for(kind).collect();
            if rows.is_empty() {
                continue;
            }

            output.push_str(&format!("\n{}\n", kind.to_string().to_uppercase()));
            output.push_str(&format!(
                "  {:<30} {:>12} {:>8}\n",
                "Category", "Subtotal", "Count"
            ));
            output.push_str(&format!("  {}\n", "-".repeat(52)));

            for row in rows {
                output.push_str(&format!(
                    "  {:<30} {:>12} {:>8}\n",
                    row.name,
                    row.subtotal.to_string(),
                    row.transactions.len()
                ));
            }
        }

        output
    }
}

/// Group transactions under their categories
///
/// Every existing category gets a row, empty ones included. With duplicate
/// names only the first category of that name claims the transactions; the
/// rest report zero. Names no category covers become rows of their own.
fn build_activity(transactions: Vec<Transaction>, categories: &[Category]) -> Vec<CategoryActivity> {
    let mut by_key: HashMap<(TransactionType, String), Vec<Transaction>> = HashMap::new();
    for txn in transactions {
        by_key
            .entry((txn.kind, txn.category.to_lowercase()))
            .or_default()
            .push(txn);
    }

    let mut activity = Vec::with_capacity(categories.len());

    for category in categories {
        let key = (category.kind, category.name.to_lowercase());
        let mut txns = by_key.remove(&key).unwrap_or_default();
        sort_newest_first(&mut txns);

        activity.push(CategoryActivity {
            category_id: Some(category.id),
            name: category.name.clone(),
            kind: category.kind,
            subtotal: txns.iter().map(|t| t.amount).sum(),
            transactions: txns,
        });
    }

    // Whatever is left references no category; keep those rows too
    for ((kind, _), mut txns) in by_key {
        sort_newest_first(&mut txns);
        activity.push(CategoryActivity {
            category_id: None,
            name: txns[0].category.clone(),
            kind,
            subtotal: txns.iter().map(|t| t.amount).sum(),
            transactions: txns,
        });
    }

    // Income first, then by name within a type
    activity.sort_by(|a, b| {
        b.kind
            .as_str()
            .cmp(a.kind.as_str())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    activity
}

fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}
