//! Inventory management, equipment slots, and the shop economy.
//!
//! Equip bonuses are applied to the character's stats directly, so combat
//! reads equipment only through stats already applied. Swapping equipment
//! removes the old bonus before the new one lands.

use crate::character::Character;
use crate::core::constants::{MAX_INVENTORY_SIZE, SELL_PRICE_DIVISOR};
use crate::items::types::{Item, ItemCatalog, ItemEffect, ItemKind, StatKind};
use crate::items::InventoryError;

pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|i| i == item_id)
}

pub fn count_item(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|i| *i == item_id).count()
}

pub fn space_remaining(character: &Character) -> usize {
    MAX_INVENTORY_SIZE - character.inventory.len()
}

/// Adds an item id to the inventory, respecting the slot cap.
pub fn add_item(character: &mut Character, item_id: &str) -> Result<(), InventoryError> {
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(InventoryError::InventoryFull);
    }
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Removes one copy of an item id from the inventory.
pub fn remove_item(character: &mut Character, item_id: &str) -> Result<(), InventoryError> {
    let position = character
        .inventory
        .iter()
        .position(|i| i == item_id)
        .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))?;
    character.inventory.remove(position);
    Ok(())
}

fn lookup<'a>(catalog: &'a ItemCatalog, item_id: &str) -> Result<&'a Item, InventoryError> {
    catalog
        .get(item_id)
        .ok_or_else(|| InventoryError::UnknownItem(item_id.to_string()))
}

fn apply_effect(character: &mut Character, effect: ItemEffect) {
    match effect.stat {
        StatKind::Health => {
            character.heal(effect.value);
        }
        StatKind::MaxHealth => character.max_health += effect.value,
        StatKind::Strength => character.strength += effect.value,
        StatKind::Magic => character.magic += effect.value,
    }
}

fn remove_equip_bonus(character: &mut Character, effect: ItemEffect) {
    match effect.stat {
        // A heal is consumed, not worn; nothing to take back.
        StatKind::Health => {}
        StatKind::MaxHealth => {
            character.max_health = character.max_health.saturating_sub(effect.value).max(1);
            character.health = character.health.min(character.max_health);
        }
        StatKind::Strength => {
            character.strength = character.strength.saturating_sub(effect.value);
        }
        StatKind::Magic => {
            character.magic = character.magic.saturating_sub(effect.value);
        }
    }
}

/// Consumes an item from the inventory and applies its effect. Health
/// effects are capped at max health; other stats raise permanently.
pub fn use_item(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
) -> Result<String, InventoryError> {
    if !has_item(character, item_id) {
        return Err(InventoryError::ItemNotFound(item_id.to_string()));
    }
    let item = lookup(catalog, item_id)?;
    if item.kind != ItemKind::Consumable {
        return Err(InventoryError::WrongItemKind {
            item_id: item_id.to_string(),
            expected: ItemKind::Consumable,
            actual: item.kind,
        });
    }

    let effect = item.effect;
    let name = item.name.clone();
    apply_effect(character, effect);
    remove_item(character, item_id)?;
    Ok(format!("Used {} ({})", name, effect))
}

fn equip(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
    kind: ItemKind,
) -> Result<Option<String>, InventoryError> {
    if !has_item(character, item_id) {
        return Err(InventoryError::ItemNotFound(item_id.to_string()));
    }
    let item = lookup(catalog, item_id)?;
    if item.kind != kind {
        return Err(InventoryError::WrongItemKind {
            item_id: item_id.to_string(),
            expected: kind,
            actual: item.kind,
        });
    }
    let new_effect = item.effect;

    // The new item leaves the bag before the old one returns, so a swap
    // never changes the inventory size.
    remove_item(character, item_id)?;

    let slot = match kind {
        ItemKind::Weapon => &mut character.equipped_weapon,
        ItemKind::Armor => &mut character.equipped_armor,
        ItemKind::Consumable => unreachable!("consumables are not equippable"),
    };
    let previous = slot.take();
    match kind {
        ItemKind::Weapon => character.equipped_weapon = Some(item_id.to_string()),
        ItemKind::Armor => character.equipped_armor = Some(item_id.to_string()),
        ItemKind::Consumable => {}
    }

    if let Some(old_id) = &previous {
        // Stale ids (removed content) lose their bonus silently.
        if let Some(old_item) = catalog.get(old_id) {
            remove_equip_bonus(character, old_item.effect);
        }
        character.inventory.push(old_id.clone());
    }
    apply_effect(character, new_effect);

    Ok(previous)
}

/// Equips a weapon, returning the previously equipped weapon id if any.
pub fn equip_weapon(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
) -> Result<Option<String>, InventoryError> {
    equip(character, catalog, item_id, ItemKind::Weapon)
}

/// Equips armor, returning the previously equipped armor id if any.
pub fn equip_armor(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
) -> Result<Option<String>, InventoryError> {
    equip(character, catalog, item_id, ItemKind::Armor)
}

fn unequip(
    character: &mut Character,
    catalog: &ItemCatalog,
    kind: ItemKind,
) -> Result<String, InventoryError> {
    let slot = match kind {
        ItemKind::Weapon => &mut character.equipped_weapon,
        ItemKind::Armor => &mut character.equipped_armor,
        ItemKind::Consumable => unreachable!("consumables are not equippable"),
    };
    let item_id = slot
        .clone()
        .ok_or(InventoryError::NothingEquipped { slot: kind })?;

    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(InventoryError::InventoryFull);
    }

    match kind {
        ItemKind::Weapon => character.equipped_weapon = None,
        ItemKind::Armor => character.equipped_armor = None,
        ItemKind::Consumable => {}
    }
    if let Some(item) = catalog.get(&item_id) {
        remove_equip_bonus(character, item.effect);
    }
    character.inventory.push(item_id.clone());
    Ok(item_id)
}

/// Returns the equipped weapon to the inventory, removing its bonus.
pub fn unequip_weapon(
    character: &mut Character,
    catalog: &ItemCatalog,
) -> Result<String, InventoryError> {
    unequip(character, catalog, ItemKind::Weapon)
}

/// Returns the equipped armor to the inventory, removing its bonus.
pub fn unequip_armor(
    character: &mut Character,
    catalog: &ItemCatalog,
) -> Result<String, InventoryError> {
    unequip(character, catalog, ItemKind::Armor)
}

/// Buys an item at list price into the inventory.
pub fn purchase_item(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
) -> Result<(), InventoryError> {
    let item = lookup(catalog, item_id)?;
    if item.cost > character.gold {
        return Err(InventoryError::InsufficientGold {
            cost: item.cost,
            gold: character.gold,
        });
    }
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(InventoryError::InventoryFull);
    }
    character.gold -= item.cost;
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Sells an item from the inventory at half its list price. Returns the gold
/// received.
pub fn sell_item(
    character: &mut Character,
    catalog: &ItemCatalog,
    item_id: &str,
) -> Result<u32, InventoryError> {
    if !has_item(character, item_id) {
        return Err(InventoryError::ItemNotFound(item_id.to_string()));
    }
    let item = lookup(catalog, item_id)?;
    let price = item.cost / SELL_PRICE_DIVISOR;
    remove_item(character, item_id)?;
    character.add_gold(price);
    Ok(price)
}
