//! Reports module for Tally
//!
//! Provides the ledger summary (totals plus per-category breakdown) and
//! the per-type statement document.

pub mod statement;
pub mod summary;

pub use statement::{Statement, StatementRow, StatementSection};
pub use summary::{CategoryActivity, LedgerSummary};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output format for exported reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plain-text document
    #[default]
    Text,
    /// Comma-separated values
    Csv,
}

impl ReportFormat {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Csv => "csv",
        }
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            _ => Err(format!(
                "Invalid report format: '{}'. Use text or csv",
                s
            )),
        }
    }
}
