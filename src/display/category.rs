//! Category display formatting
//!
//! Formats categories for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, TransactionType};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            kind: category.kind.to_string(),
        }
    }
}

/// Format a list of categories as a table
pub fn format_category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'tally init' to create default categories."
            .to_string();
    }

    let rows: Vec<CategoryRow> = categories.iter().map(CategoryRow::from).collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

/// Format categories grouped by type
pub fn format_category_overview(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'tally init' to create default categories."
            .to_string();
    }

    let mut output = String::new();

    for (i, kind) in TransactionType::all().iter().enumerate() {
        let of_kind: Vec<&Category> = categories.iter().filter(|c| c.kind == *kind).collect();

        output.push_str(&format!("{}\n", kind));
        if of_kind.is_empty() {
            output.push_str("  (no categories)\n");
        } else {
            for (j, category) in of_kind.iter().enumerate() {
                let is_last = j == of_kind.len() - 1;
                let prefix = if is_last { "└── " } else { "├── " };
                output.push_str(&format!("  {}{}\n", prefix, category.name));
            }
        }

        if i == 0 {
            output.push('\n');
        }
    }

    output
}

/// Format category details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", category.id));
    output.push_str(&format!("  Type:    {}\n", category.kind));
    output.push_str(&format!(
        "  Created: {}\n",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_table() {
        let output = format_category_table(&[]);
        assert!(output.contains("No categories found"));
        assert!(output.contains("tally init"));
    }

    #[test]
    fn test_format_category_table() {
        let categories = vec![
            Category::new("Salary", TransactionType::Income),
            Category::new("Food", TransactionType::Expense),
        ];

        let output = format_category_table(&categories);
        assert!(output.contains("Salary"));
        assert!(output.contains("Food"));
        assert!(output.contains("Income"));
        assert!(output.contains("Expense"));
    }

    #[test]
    fn test_format_category_overview() {
        let categories = vec![
            Category::new("Salary", TransactionType::Income),
            Category::new("Food", TransactionType::Expense),
            Category::new("Utilities", TransactionType::Expense),
        ];

        let output = format_category_overview(&categories);
        assert!(output.contains("Income\n"));
        assert!(output.contains("Expense\n"));
        assert!(output.contains("├── Food"));
        assert!(output.contains("└── Utilities"));
    }

    #[test]
    fn test_format_category_details() {
        let category = Category::new("Food", TransactionType::Expense);
        let output = format_category_details(&category);

        assert!(output.contains("Category: Food"));
        assert!(output.contains("Type:    Expense"));
    }
}
