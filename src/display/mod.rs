//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and detail views.

pub mod category;
pub mod transaction;

pub use category::{format_category_details, format_category_overview, format_category_table};
pub use transaction::{format_transaction_details, format_transaction_table};
