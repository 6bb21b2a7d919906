//! Category CLI commands
//!
//! Implements CLI commands for the category lifecycle.

use clap::Subcommand;

use crate::display::{format_category_details, format_category_overview, format_category_table};
use crate::error::{TallyError, TallyResult};
use crate::models::TransactionType;
use crate::services::{CategoryService, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Category type (income or expense)
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
    },

    /// List all categories (organized by type)
    List {
        /// Show only one type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TallyResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add { name, kind } => {
            let kind = parse_kind(&kind)?;
            let category = service.create(&name, kind)?;

            println!("Created category: {}", category.name);
            println!("  Type: {}", category.kind);
            println!("  ID:   {}", category.id);
        }

        CategoryCommands::List { kind } => match kind {
            Some(kind_str) => {
                let kind = parse_kind(&kind_str)?;
                let categories = service.list_by_kind(kind)?;
                println!("{}", format_category_table(&categories));
            }
            None => {
                let categories = service.list()?;
                print!("{}", format_category_overview(&categories));
            }
        },

        CategoryCommands::Show { category } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| TallyError::category_not_found(&category))?;

            print!("{}", format_category_details(&cat));
        }

        CategoryCommands::Rename { category, name } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| TallyError::category_not_found(&category))?;

            let old_name = cat.name.clone();
            let updated = service.rename(cat.id, &name)?;

            println!("Renamed category: {} -> {}", old_name, updated.name);
            println!("Transactions recorded under '{}' keep that name.", old_name);
        }

        CategoryCommands::Delete { category, force } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| TallyError::category_not_found(&category))?;

            let txn_service = TransactionService::new(storage);
            let referencing = txn_service
                .list(TransactionFilter::new().category(cat.name.clone()))?
                .len();

            if !force {
                println!("About to delete category: {} ({})", cat.name, cat.kind);
                if referencing > 0 {
                    println!(
                        "  {} transactions reference this category and will keep the name.",
                        referencing
                    );
                }
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(cat.id)?;
            println!("Deleted category: {}", deleted.name);
            if referencing > 0 {
                println!(
                    "{} transactions still carry the name '{}'.",
                    referencing, deleted.name
                );
            }
        }
    }

    Ok(())
}

fn parse_kind(s: &str) -> TallyResult<TransactionType> {
    s.parse::<TransactionType>().map_err(TallyError::Validation)
}
