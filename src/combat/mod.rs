//! Combat engine: enemy roster, battle state machine, class abilities.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;

use thiserror::Error;

use crate::character::CharacterClass;

#[derive(Debug, Error)]
pub enum CombatError {
    #[error("'{0}' is not a known enemy kind")]
    UnknownEnemyKind(String),

    #[error("character level must be at least 1, got {0}")]
    InvalidLevel(u32),

    #[error("character is incapacitated and cannot fight")]
    CharacterIncapacitated,

    #[error("battle is not active")]
    BattleNotActive,

    #[error("class {0} has no special ability")]
    NoAbilityForClass(CharacterClass),
}
