//! Character record, class table, progression, and persistence.

pub mod manager;
pub mod types;

pub use manager::*;
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("'{0}' is not a valid character class")]
    InvalidClass(String),

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },

    #[error("no saved character named '{0}'")]
    NotFound(String),

    #[error("save file for '{name}' is corrupted: {reason}")]
    SaveCorrupted { name: String, reason: String },

    #[error("save data is invalid: {0}")]
    InvalidSaveData(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
