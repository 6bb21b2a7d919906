//! CLI commands for reports
//!
//! Generates the terminal summary and the per-type statement export.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::TransactionType;
use crate::reports::{LedgerSummary, ReportFormat, Statement};
use crate::storage::Storage;

/// Handle the summary command
pub fn handle_summary_command(storage: &Storage) -> TallyResult<()> {
    let summary = LedgerSummary::generate(storage)?;
    println!("{}", summary.format_terminal());
    Ok(())
}

/// Handle the report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    kind: String,
    output: Option<PathBuf>,
    format: Option<String>,
    to_stdout: bool,
) -> TallyResult<()> {
    let kind = kind
        .parse::<TransactionType>()
        .map_err(TallyError::Validation)?;

    let format = match format {
        Some(fmt_str) => fmt_str
            .parse::<ReportFormat>()
            .map_err(TallyError::Validation)?,
        None => settings.default_report_format,
    };

    let statement = Statement::generate(storage, kind)?;

    if to_stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        match format {
            ReportFormat::Text => statement.write_text(&mut handle)?,
            ReportFormat::Csv => statement.export_csv(&mut handle)?,
        }
        handle.flush()?;
        return Ok(());
    }

    let path = output.unwrap_or_else(|| PathBuf::from(statement.file_name(format)));

    // write_to_file removes any partial file on failure, so only the
    // notification is left to handle here.
    match statement.write_to_file(&path, format) {
        Ok(()) => println!("Report exported to: {}", path.display()),
        Err(_) => eprintln!("Error: failed to export the report. No file was saved."),
    }

    Ok(())
}
