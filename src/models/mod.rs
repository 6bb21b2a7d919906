//! Core data models for Tally
//!
//! This module contains the data structures that represent the tracking
//! domain: transactions, categories, identifiers, and money.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::{Category, DefaultCategory};
pub use ids::{CategoryId, TransactionId};
pub use money::Money;
pub use transaction::{Transaction, TransactionType};
