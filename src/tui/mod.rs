//! Terminal User Interface module
//!
//! This module provides a full-featured TUI for Tally using ratatui.
//! The TUI includes views for transactions and categories, modal dialogs
//! for data entry, and toast notifications.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

// Keybindings
pub mod keybindings;

pub use app::App;
pub use terminal::run_tui;
