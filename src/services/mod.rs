//! Service layer for Tally
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, filtering, and partial updates.

pub mod category;
pub mod transaction;

pub use category::CategoryService;
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
