//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display,
//! including the list table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            amount: txn.amount.to_string(),
            description: truncate(&txn.description, 40),
        }
    }
}

/// Format a list of transactions as a table
pub fn format_transaction_table(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n\nRun 'tally add' to record one.".to_string();
    }

    let rows: Vec<TransactionRow> = transactions.iter().map(TransactionRow::from).collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Date:        {}\n", txn.date));
    output.push_str(&format!("  Type:        {}\n", txn.kind));
    output.push_str(&format!("  Category:    {}\n", txn.category));
    output.push_str(&format!("  Amount:      {}\n", txn.amount));

    if !txn.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", txn.description));
    }

    output.push_str(&format!(
        "  Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
