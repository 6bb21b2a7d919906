//! Statement report
//!
//! Renders one transaction type as a document: a title, a generation
//! timestamp, the type total, then a table section per category holding at
//! least one transaction. Sections are separated by a single blank line
//! with no trailing spacer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};

use crate::error::{TallyError, TallyResult};
use crate::models::{Category, Money, Transaction, TransactionType};
use crate::storage::Storage;

use super::summary::LedgerSummary;
use super::ReportFormat;

/// One transaction line in a statement section
#[derive(Debug, Clone)]
pub struct StatementRow {
    pub date: NaiveDate,
    pub amount: Money,
    pub description: String,
}

impl StatementRow {
    /// Description as rendered; empty descriptions show as `-`
    pub fn display_description(&self) -> &str {
        if self.description.is_empty() {
            "-"
        } else {
            &self.description
        }
    }
}

/// One category's table in a statement
#[derive(Debug, Clone)]
pub struct StatementSection {
    pub category: String,
    pub subtotal: Money,
    /// Rows, newest first
    pub rows: Vec<StatementRow>,
}

/// Statement for one transaction type
#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: TransactionType,
    pub generated_at: DateTime<Local>,
    pub total: Money,
    /// Sections for categories with at least one transaction, name order
    pub sections: Vec<StatementSection>,
}

impl Statement {
    /// Generate a statement for one transaction type from storage
    pub fn generate(storage: &Storage, kind: TransactionType) -> TallyResult<Self> {
        let transactions = storage.ledger.get_all_transactions()?;
        let categories = storage.ledger.get_all_categories()?;
        Ok(Self::from_parts(kind, transactions, &categories, Local::now()))
    }

    /// Build a statement from already-loaded records
    pub fn from_parts(
        kind: TransactionType,
        transactions: Vec<Transaction>,
        categories: &[Category],
        generated_at: DateTime<Local>,
    ) -> Self {
        let summary = LedgerSummary::from_parts(transactions, categories);

        let total = match kind {
            TransactionType::Income => summary.total_income,
            TransactionType::Expense => summary.total_expense,
        };

        let sections = summary
            .activity_for(kind)
            .filter(|a| !a.transactions.is_empty())
            .map(|a| StatementSection {
                category: a.name.clone(),
                subtotal: a.subtotal,
                rows: a
                    .transactions
                    .iter()
                    .map(|t| StatementRow {
                        date: t.date,
                        amount: t.amount,
                        description: t.description.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            kind,
            generated_at,
            total,
            sections,
        }
    }

    /// Title line, e.g. "Income Report"
    pub fn title(&self) -> String {
        format!("{} Report", self.kind)
    }

    /// Label for the total line
    fn total_label(&self) -> &'static str {
        match self.kind {
            TransactionType::Income => "Total Income",
            TransactionType::Expense => "Total Expenses",
        }
    }

    /// Whether the statement has no sections at all
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// File name for this statement, e.g. "income-report-2025-08-25.txt"
    pub fn file_name(&self, format: ReportFormat) -> String {
        format!(
            "{}-report-{}.{}",
            self.kind.as_str(),
            self.generated_at.format("%Y-%m-%d"),
            format.extension()
        )
    }

    /// Write the statement as a plain-text document
    pub fn write_text<W: Write>(&self, writer: &mut W) -> TallyResult<()> {
        writeln!(writer, "{}", self.title())?;
        writeln!(
            writer,
            "Generated on: {}",
            self.generated_at.format("%b %d, %Y %H:%M")
        )?;
        writeln!(writer, "{}: {}", self.total_label(), self.total)?;

        for section in &self.sections {
            writeln!(writer)?;
            writeln!(writer, "{}", section.category)?;
            writeln!(writer, "{:<14} {:>12}  {}", "Date", "Amount", "Description")?;
            for row in &section.rows {
                writeln!(
                    writer,
                    "{:<14} {:>12}  {}",
                    row.date.format("%b %d, %Y").to_string(),
                    row.amount.to_string(),
                    row.display_description()
                )?;
            }
            writeln!(writer, "Subtotal: {}", section.subtotal)?;
        }

        Ok(())
    }

    /// Write the statement as CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TallyResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Category", "Date", "Amount", "Description"])
            .map_err(|e| TallyError::Export(e.to_string()))?;

        for section in &self.sections {
            for row in &section.rows {
                let date = row.date.to_string();
                let amount = format_decimal(row.amount);
                csv_writer
                    .write_record([
                        section.category.as_str(),
                        date.as_str(),
                        amount.as_str(),
                        row.description.as_str(),
                    ])
                    .map_err(|e| TallyError::Export(e.to_string()))?;
            }

            let label = format!("{} Subtotal", section.category);
            let subtotal = format_decimal(section.subtotal);
            csv_writer
                .write_record([label.as_str(), "", subtotal.as_str(), ""])
                .map_err(|e| TallyError::Export(e.to_string()))?;
        }

        let total = format_decimal(self.total);
        csv_writer
            .write_record(["Total", "", total.as_str(), ""])
            .map_err(|e| TallyError::Export(e.to_string()))?;

        csv_writer
            .flush()
            .map_err(|e| TallyError::Export(e.to_string()))?;

        Ok(())
    }

    /// Write the statement to a file, removing the partial file on failure
    pub fn write_to_file(&self, path: &Path, format: ReportFormat) -> TallyResult<()> {
        let result = self.try_write_file(path, format);
        if result.is_err() {
            // Never leave a half-written report behind
            let _ = std::fs::remove_file(path);
        }
        result
    }

    fn try_write_file(&self, path: &Path, format: ReportFormat) -> TallyResult<()> {
        let file = File::create(path)
            .map_err(|e| TallyError::Report(format!("Failed to create report file: {}", e)))?;
        let mut writer = BufWriter::new(file);

        match format {
            ReportFormat::Text => self.write_text(&mut writer)?,
            ReportFormat::Csv => self.export_csv(&mut writer)?,
        }

        writer
            .flush()
            .map_err(|e| TallyError::Report(format!("Failed to write report file: {}", e)))?;

        Ok(())
    }
}

fn format_decimal(amount: Money) -> String {
    format!("{:.2}", amount.cents() as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn txn(kind: TransactionType, day: u32, cents: i64, category: &str, desc: &str) -> Transaction {
        Transaction::with_details(
            kind,
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            Money::from_cents(cents),
            category,
            desc,
        )
    }

    fn fixed_timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 30, 9, 15, 0).unwrap()
    }

    fn render_text(statement: &Statement) -> String {
        let mut buffer = Vec::new();
        statement.write_text(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_statement_structure() {
        let categories = vec![
            Category::new("Food", TransactionType::Expense),
            Category::new("Utilities", TransactionType::Expense),
            Category::new("Entertainment", TransactionType::Expense),
        ];
        let transactions = vec![
            txn(TransactionType::Expense, 5, 1500, "Food", "groceries"),
            txn(TransactionType::Expense, 18, 2500, "Food", ""),
            txn(TransactionType::Expense, 10, 9000, "Utilities", "electric"),
            txn(TransactionType::Income, 1, 100000, "Salary", ""),
        ];

        let statement = Statement::from_parts(
            TransactionType::Expense,
            transactions,
            &categories,
            fixed_timestamp(),
        );

        assert_eq!(statement.total.cents(), 1500 + 2500 + 9000);
        // Entertainment has no transactions, so no section
        assert_eq!(statement.sections.len(), 2);
        assert_eq!(statement.sections[0].category, "Food");
        assert_eq!(statement.sections[1].category, "Utilities");

        // Rows newest first
        let food = &statement.sections[0];
        assert_eq!(food.subtotal.cents(), 4000);
        assert_eq!(food.rows[0].date, NaiveDate::from_ymd_opt(2025, 6, 18).unwrap());
        assert_eq!(food.rows[1].date, NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());
    }

    #[test]
    fn test_text_rendering() {
        let categories = vec![Category::new("Food", TransactionType::Expense)];
        let transactions = vec![
            txn(TransactionType::Expense, 5, 1500, "Food", "groceries"),
            txn(TransactionType::Expense, 18, 2500, "Food", ""),
        ];

        let statement = Statement::from_parts(
            TransactionType::Expense,
            transactions,
            &categories,
            fixed_timestamp(),
        );
        let output = render_text(&statement);

        assert!(output.starts_with("Expense Report\n"));
        assert!(output.contains("Generated on: Jun 30, 2025 09:15"));
        assert!(output.contains("Total Expenses: $40.00"));
        assert!(output.contains("Jun 18, 2025"));
        // Empty description renders as a dash
        assert!(output.contains(" -"));
        assert!(output.contains("Subtotal: $40.00"));
    }

    #[test]
    fn test_no_trailing_spacer() {
        let categories = vec![
            Category::new("Food", TransactionType::Expense),
            Category::new("Utilities", TransactionType::Expense),
        ];
        let transactions = vec![
            txn(TransactionType::Expense, 5, 1500, "Food", ""),
            txn(TransactionType::Expense, 10, 9000, "Utilities", ""),
        ];

        let statement = Statement::from_parts(
            TransactionType::Expense,
            transactions,
            &categories,
            fixed_timestamp(),
        );
        let output = render_text(&statement);

        // Exactly one blank line between sections, none at the end
        assert!(output.contains("Subtotal: $15.00\n\nUtilities\n"));
        assert!(output.ends_with("Subtotal: $90.00\n"));
        assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_empty_statement() {
        let statement = Statement::from_parts(
            TransactionType::Income,
            vec![],
            &[Category::new("Salary", TransactionType::Income)],
            fixed_timestamp(),
        );

        assert!(statement.is_empty());
        assert!(statement.total.is_zero());

        let output = render_text(&statement);
        assert!(output.contains("Total Income: $0.00"));
        assert!(!output.contains("Salary"));
        assert!(output.ends_with("Total Income: $0.00\n"));
    }

    #[test]
    fn test_file_name() {
        let statement =
            Statement::from_parts(TransactionType::Income, vec![], &[], fixed_timestamp());

        assert_eq!(
            statement.file_name(ReportFormat::Text),
            "income-report-2025-06-30.txt"
        );
        assert_eq!(
            statement.file_name(ReportFormat::Csv),
            "income-report-2025-06-30.csv"
        );
    }

    #[test]
    fn test_csv_export() {
        let categories = vec![Category::new("Food", TransactionType::Expense)];
        let transactions = vec![txn(
            TransactionType::Expense,
            5,
            1550,
            "Food",
            "cheese, bread",
        )];

        let statement = Statement::from_parts(
            TransactionType::Expense,
            transactions,
            &categories,
            fixed_timestamp(),
        );

        let mut buffer = Vec::new();
        statement.export_csv(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with("Category,Date,Amount,Description\n"));
        // Comma in the description gets quoted
        assert!(output.contains("\"cheese, bread\""));
        assert!(output.contains("Food,2025-06-05,15.50"));
        assert!(output.contains("Total,,15.50,"));
    }

    #[test]
    fn test_write_to_file_removes_partial_on_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let statement =
            Statement::from_parts(TransactionType::Income, vec![], &[], fixed_timestamp());

        // Writing into a missing directory fails without leaving a file
        let bad_path = temp_dir.path().join("missing").join("report.txt");
        assert!(statement.write_to_file(&bad_path, ReportFormat::Text).is_err());
        assert!(!bad_path.exists());

        // A good path succeeds
        let good_path = temp_dir.path().join("report.txt");
        statement
            .write_to_file(&good_path, ReportFormat::Text)
            .unwrap();
        let contents = std::fs::read_to_string(&good_path).unwrap();
        assert!(contents.starts_with("Income Report\n"));
    }
}
