//! Category model
//!
//! Categories are user-defined labels grouping transactions, scoped to
//! either income or expense. Transactions reference them by name only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// A label grouping transactions of one type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name. Unique within its type by convention only; creation
    /// does not reject duplicates.
    pub name: String,

    /// Whether this labels income or expense transactions
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Categories seeded into a fresh data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Salary,
    Freelance,
    Food,
    Transportation,
    Entertainment,
    Utilities,
}

impl DefaultCategory {
    /// Get all default categories in order
    pub fn all() -> &'static [Self] {
        &[
            Self::Salary,
            Self::Freelance,
            Self::Food,
            Self::Transportation,
            Self::Entertainment,
            Self::Utilities,
        ]
    }

    /// Get the name for this default category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
        }
    }

    /// Which transaction type this default belongs to
    pub fn kind(&self) -> TransactionType {
        match self {
            Self::Salary | Self::Freelance => TransactionType::Income,
            Self::Food | Self::Transportation | Self::Entertainment | Self::Utilities => {
                TransactionType::Expense
            }
        }
    }

    /// Create a Category from this default
    pub fn to_category(&self) -> Category {
        Category::new(self.name(), self.kind())
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
