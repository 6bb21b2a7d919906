//! Dialog modules for the TUI
//!
//! Contains modal dialogs for various operations

pub mod category;
pub mod confirm;
pub mod help;
pub mod transaction;
