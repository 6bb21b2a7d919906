//! Configuration CLI commands
//!
//! Shows resolved paths and settings, and updates individual settings.

use clap::Subcommand;

use crate::config::{Settings, TallyPaths};
use crate::error::{TallyError, TallyResult};
use crate::reports::ReportFormat;

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Set a configuration value
    Set {
        /// Setting key (currency-symbol, date-format, report-format)
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a configuration command
pub fn handle_config_command(
    paths: &TallyPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> TallyResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Date format:           {}", settings.date_format);
            println!(
                "  Default report format: {}",
                settings.default_report_format
            );
        }

        ConfigCommands::Set { key, value } => {
            match key.as_str() {
                "currency-symbol" => settings.currency_symbol = value.clone(),
                "date-format" => {
                    validate_date_format(&value)?;
                    settings.date_format = value.clone();
                }
                "report-format" => {
                    settings.default_report_format = value
                        .parse::<ReportFormat>()
                        .map_err(TallyError::Validation)?;
                }
                _ => {
                    return Err(TallyError::Validation(format!(
                        "Unknown setting: '{}'. Use currency-symbol, date-format, or report-format",
                        key
                    )))
                }
            }

            settings.save(paths)?;
            println!("Updated {} to '{}'", key, value);
        }
    }

    Ok(())
}

/// Reject chrono patterns that cannot format a date
///
/// `DelayedFormat` only reports bad specifiers when the formatted output is
/// consumed, so run the pattern against a probe date before storing it.
fn validate_date_format(pattern: &str) -> TallyResult<()> {
    use std::fmt::Write;

    let probe = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default();
    let mut rendered = String::new();
    if write!(rendered, "{}", probe.format(pattern)).is_err() {
        return Err(TallyError::Validation(format!(
            "Invalid date format: '{}'. Use chrono specifiers like %Y-%m-%d",
            pattern
        )));
    }

    Ok(())
}
