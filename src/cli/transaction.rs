//! Transaction CLI commands
//!
//! Implements CLI commands for the transaction lifecycle.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{TallyError, TallyResult};
use crate::models::{Money, TransactionType};
use crate::services::{CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions
    List {
        /// Filter by type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Filter by category name
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle the top-level `add` shortcut
pub fn handle_add_command(
    storage: &Storage,
    kind: String,
    amount: String,
    category: String,
    description: Option<String>,
    date: Option<String>,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);

    let kind = parse_kind(&kind)?;
    let amount = parse_amount(&amount)?;
    let date = match date {
        Some(date_str) => parse_date(&date_str)?,
        None => chrono::Local::now().date_naive(),
    };

    let input = CreateTransactionInput {
        kind,
        date,
        amount,
        category,
        description,
    };

    let txn = service.create(input)?;

    println!("Created transaction:");
    println!("  ID:       {}", txn.id);
    println!("  Date:     {}", txn.date);
    println!("  Type:     {}", txn.kind);
    println!("  Amount:   {}", txn.amount);
    println!("  Category: {}", txn.category);
    if !txn.description.is_empty() {
        println!("  Note:     {}", txn.description);
    }

    Ok(())
}

/// Handle a transaction command
pub fn handle_transaction_command(storage: &Storage, cmd: TransactionCommands) -> TallyResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::List {
            kind,
            category,
            limit,
            from,
            to,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if let Some(kind_str) = kind {
                filter = filter.kind(parse_kind(&kind_str)?);
            }

            if let Some(cat_name) = category {
                filter = filter.category(cat_name);
            }

            if let Some(from_str) = from {
                filter.start_date = Some(parse_date(&from_str)?);
            }

            if let Some(to_str) = to {
                filter.end_date = Some(parse_date(&to_str)?);
            }

            let transactions = service.list(filter)?;

            println!("{}", format_transaction_table(&transactions));
            println!("\nShowing {} transactions", transactions.len());
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;

            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;

            if kind.is_none()
                && amount.is_none()
                && category.is_none()
                && date.is_none()
                && description.is_none()
            {
                println!("No changes specified. Use --type, --amount, --category, --date, or --description.");
                return Ok(());
            }

            let new_kind = kind.as_deref().map(parse_kind).transpose()?;
            let new_amount = amount.as_deref().map(parse_amount).transpose()?;
            let new_date = date.as_deref().map(parse_date).transpose()?;

            let updated = service.update(txn.id, new_kind, new_date, new_amount, category, description)?;

            println!("Updated transaction: {}", updated.id);
            println!("  Date:     {}", updated.date);
            println!("  Type:     {}", updated.kind);
            println!("  Amount:   {}", updated.amount);
            println!("  Category: {}", updated.category);
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;

            if !force {
                println!("About to delete transaction:");
                println!("  Date:     {}", txn.date);
                println!("  Type:     {}", txn.kind);
                println!("  Amount:   {}", txn.amount);
                println!("  Category: {}", txn.category);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction: {} ({} {} {})",
                deleted.id, deleted.date, deleted.amount, deleted.category
            );
        }
    }

    Ok(())
}

fn parse_kind(s: &str) -> TallyResult<TransactionType> {
    s.parse::<TransactionType>().map_err(TallyError::Validation)
}

fn parse_amount(s: &str) -> TallyResult<Money> {
    Money::parse(s).map_err(|e| {
        TallyError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '50.00' or '100'. Error: {}",
            s, e
        ))
    })
}

fn parse_date(s: &str) -> TallyResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| TallyError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s)))
}
