//! Save/load system
//!
//! Versioned player records, save slots and memorial files.

pub mod memorial;
pub mod save_game;

pub use memorial::{memorial_directory, write_memorial};
pub use save_game::{
    delete_save, list_saves, load_game, save_directory, save_exists, save_game, save_path,
    PlayerRecord, SaveData, SaveSummary, SAVE_VERSION,
};

use thiserror::Error;

/// Failures while reading or writing persisted state
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Ron(String),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("invalid save data: {0}")]
    InvalidData(String),
}

impl From<ron::error::SpannedError> for SaveError {
    fn from(e: ron::error::SpannedError) -> Self {
        SaveError::Ron(e.to_string())
    }
}

impl From<ron::Error> for SaveError {
    fn from(e: ron::Error) -> Self {
        SaveError::Ron(e.to_string())
    }
}
