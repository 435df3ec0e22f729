//! Data loading
//!
//! This module handles loading game settings from external RON files.

pub mod loader;

pub use loader::{GameConfig, CONFIG_FILE};
