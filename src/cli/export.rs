//! CLI commands for data export
//!
//! Provides commands for exporting ledger data in various formats.

use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::error::{TallyError, TallyResult};
use crate::export::{export_full_json, export_full_yaml, export_transactions_csv, FullExport};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions only)
    Csv,
    /// JSON format (full ledger)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the full ledger to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> TallyResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, output, format, pretty),
        ExportCommands::Transactions { output } => handle_export_transactions(storage, output),
        ExportCommands::Info => handle_export_info(storage),
    }
}

/// Handle full export
fn handle_export_all(
    storage: &Storage,
    output: PathBuf,
    format: ExportFormat,
    pretty: bool,
) -> TallyResult<()> {
    let file = File::create(&output).map_err(|e| {
        TallyError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => {
            export_transactions_csv(storage, &mut writer)?;
            println!("Transactions exported to: {}", output.display());
            println!("Note: CSV format exports transactions only. Use JSON or YAML for a full ledger export.");
        }
        ExportFormat::Json => {
            export_full_json(storage, &mut writer, pretty)?;
            println!("Full ledger exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            export_full_yaml(storage, &mut writer)?;
            println!("Full ledger exported to: {}", output.display());
        }
    }

    Ok(())
}

/// Handle transactions export
fn handle_export_transactions(storage: &Storage, output: PathBuf) -> TallyResult<()> {
    let file = File::create(&output).map_err(|e| {
        TallyError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    export_transactions_csv(storage, &mut writer)?;

    let count = storage.ledger.transaction_count()?;
    println!("Exported {} transactions to: {}", count, output.display());

    Ok(())
}

/// Show export information
fn handle_export_info(storage: &Storage) -> TallyResult<()> {
    let export = FullExport::from_storage(storage)?;

    println!("Export Information");
    println!("==================\n");

    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!();

    println!("Data Summary:");
    println!("  Transactions: {}", export.metadata.transaction_count);
    println!("  Categories:   {}", export.metadata.category_count);
    println!();

    if let Some(earliest) = &export.metadata.earliest_transaction {
        println!("Transaction Date Range:");
        println!("  Earliest: {}", earliest);
    }
    if let Some(latest) = &export.metadata.latest_transaction {
        println!("  Latest:   {}", latest);
    }

    println!("\nAvailable Export Formats:");
    println!("  csv  - CSV format (transactions only)");
    println!("  json - JSON format (full ledger, machine-readable)");
    println!("  yaml - YAML format (full ledger, human-readable)");

    println!("\nExamples:");
    println!("  tally export all backup.json --format json --pretty");
    println!("  tally export transactions txns.csv");

    Ok(())
}
