//! Quest catalog and the quest graph manager.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("quest '{0}' does not exist")]
    QuestNotFound(String),

    #[error("quest '{quest_id}' requires level {required}, character is level {actual}")]
    LevelTooLow {
        quest_id: String,
        required: u32,
        actual: u32,
    },

    #[error("quest '{quest_id}' requires completing '{prerequisite}' first")]
    PrerequisiteUnmet {
        quest_id: String,
        prerequisite: String,
    },

    #[error("quest '{0}' has already been completed")]
    QuestAlreadyCompleted(String),

    #[error("quest '{0}' is already active")]
    QuestAlreadyActive(String),

    #[error("quest '{0}' is not active")]
    QuestNotActive(String),

    #[error("the quest catalog is empty")]
    EmptyCatalog,
}
