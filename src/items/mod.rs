//! Item catalog, inventory, equipment, and the shop.

pub mod inventory;
pub mod types;

pub use inventory::*;
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory is full")]
    InventoryFull,

    #[error("item '{0}' is not in the inventory")]
    ItemNotFound(String),

    #[error("item '{0}' does not exist in the item catalog")]
    UnknownItem(String),

    #[error("item '{item_id}' is a {actual}, expected a {expected}")]
    WrongItemKind {
        item_id: String,
        expected: ItemKind,
        actual: ItemKind,
    },

    #[error("no {slot} equipped")]
    NothingEquipped { slot: ItemKind },

    #[error("not enough gold: item costs {cost}, have {gold}")]
    InsufficientGold { cost: u32, gold: u32 },
}
