//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod config;
pub mod export;
pub mod report;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, handle_summary_command};
pub use transaction::{handle_add_command, handle_transaction_command, TransactionCommands};
