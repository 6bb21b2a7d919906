//! Configuration module for Tally
//!
//! This module provides configuration management including:
//! - Platform-native path resolution
//! - User settings persistence
//! - Application preferences

pub mod paths;
pub mod settings;

pub use paths::TallyPaths;
pub use settings::Settings;
