//! Quest Chronicles - Text-Driven RPG Library
//!
//! This module exposes the game logic for the CLI binary and for tests:
//! the combat engine, the quest graph manager, the character record, and
//! the inventory/shop economy.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod data;
pub mod items;
pub mod quests;

pub use character::{Character, CharacterClass, CharacterManager};
pub use combat::{Battle, BattleOutcome, BattleStatus, BattleWinner, Enemy, EnemyKind};
pub use core::GameSession;
pub use items::{Item, ItemCatalog};
pub use quests::{Quest, QuestCatalog};
