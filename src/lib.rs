//! Tally - Terminal-based personal finance tracker
//!
//! This library provides the core functionality for the Tally finance
//! tracker. It records income and expense transactions against named
//! categories, aggregates them into totals and per-category breakdowns,
//! and exports per-type statement reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, money)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Summary aggregation and statement generation
//! - `export`: Full-ledger export in JSON, CSV, and YAML
//! - `display`: Terminal table formatting
//! - `cli`: Command-line subcommand handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use tally_cli::config::{Settings, TallyPaths};
//!
//! let paths = TallyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::TallyError;
