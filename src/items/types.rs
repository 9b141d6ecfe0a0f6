//! Item catalog entries.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::{read_blocks, Block, DataError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Consumable => "consumable",
        };
        f.write_str(name)
    }
}

impl FromStr for ItemKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Ok(ItemKind::Weapon),
            "armor" => Ok(ItemKind::Armor),
            "consumable" => Ok(ItemKind::Consumable),
            _ => Err(DataError::InvalidItemKind(s.to_string())),
        }
    }
}

/// The stats an item effect may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    Health,
    MaxHealth,
    Strength,
    Magic,
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatKind::Health => "health",
            StatKind::MaxHealth => "max_health",
            StatKind::Strength => "strength",
            StatKind::Magic => "magic",
        };
        f.write_str(name)
    }
}

impl FromStr for StatKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "health" => Ok(StatKind::Health),
            "max_health" => Ok(StatKind::MaxHealth),
            "strength" => Ok(StatKind::Strength),
            "magic" => Ok(StatKind::Magic),
            _ => Err(DataError::InvalidStat(s.to_string())),
        }
    }
}

/// A `stat:value` modifier, e.g. `health:50` or `strength:10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub stat: StatKind,
    pub value: u32,
}

impl ItemEffect {
    pub fn parse(s: &str) -> Result<Self, DataError> {
        let (stat, value) = s
            .split_once(':')
            .ok_or_else(|| DataError::InvalidEffect(s.to_string()))?;
        let value = value
            .trim()
            .parse()
            .map_err(|_| DataError::InvalidEffect(s.to_string()))?;
        Ok(Self {
            stat: stat.parse()?,
            value,
        })
    }
}

impl fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} {}", self.value, self.stat)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,
    pub name: String,
    pub kind: ItemKind,
    pub effect: ItemEffect,
    pub cost: u32,
    pub description: String,
}

impl Item {
    pub fn from_block(block: &Block) -> Result<Self, DataError> {
        Ok(Self {
            item_id: block.get("item_id")?.to_string(),
            name: block.get("name")?.to_string(),
            kind: block.get("type")?.parse()?,
            effect: ItemEffect::parse(block.get("effect")?)?,
            cost: block.get_u32("cost")?,
            description: block.get("description")?.to_string(),
        })
    }
}

/// The read-only item catalog, keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<String, Item>,
}

impl ItemCatalog {
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|i| (i.item_id.clone(), i))
                .collect(),
        }
    }

    /// Loads `items.txt`.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let blocks = read_blocks(path)?;
        let items = blocks
            .iter()
            .map(Item::from_block)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_items(items))
    }

    pub fn get(&self, item_id: &str) -> Option<&Item> {
        self.items.get(item_id)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
