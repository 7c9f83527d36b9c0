//! cashbook-config
//!
//! Device-local persistence for the last-used entry defaults.
//! Owns the EntryDefaults data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::PreferencesManager;
pub use model::EntryDefaults;
