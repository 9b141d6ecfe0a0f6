//! Flat-text game data files.
//!
//! Quests and items live in blank-line-separated blocks of `KEY: value`
//! lines. This module owns the block parser plus the starter data files;
//! the quest and item modules turn blocks into typed catalog entries.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file '{0}' not found")]
    MissingFile(PathBuf),

    #[error("invalid data line: '{0}'")]
    InvalidLine(String),

    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("field '{field}' must be an integer, got '{value}'")]
    InvalidInteger { field: String, value: String },

    #[error("'{0}' is not a valid item kind")]
    InvalidItemKind(String),

    #[error("'{0}' is not a valid item effect (expected 'stat:value')")]
    InvalidEffect(String),

    #[error("'{0}' is not a stat an item can modify")]
    InvalidStat(String),

    #[error("prerequisite '{prerequisite}' of quest '{quest}' does not exist")]
    UnknownPrerequisite { quest: String, prerequisite: String },

    #[error("prerequisite cycle detected through quest '{0}'")]
    PrerequisiteCycle(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One parsed block. Keys are lowercased; values keep their original text.
#[derive(Debug, Clone, Default)]
pub struct Block {
    fields: BTreeMap<String, String>,
}

impl Block {
    pub fn get(&self, field: &str) -> Result<&str, DataError> {
        self.fields
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| DataError::MissingField(field.to_string()))
    }

    pub fn get_u32(&self, field: &str) -> Result<u32, DataError> {
        let value = self.get(field)?;
        value.parse().map_err(|_| DataError::InvalidInteger {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// Splits file content into blocks on blank lines and each line on the first
/// `": "`. A line without a separator is a format error.
pub fn parse_blocks(content: &str) -> Result<Vec<Block>, DataError> {
    let mut blocks = Vec::new();
    let mut current = Block::default();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            if !current.fields.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        let (key, value) = line
            .split_once(": ")
            .ok_or_else(|| DataError::InvalidLine(line.to_string()))?;
        current
            .fields
            .insert(key.trim().to_lowercase(), value.trim().to_string());
    }
    if !current.fields.is_empty() {
        blocks.push(current);
    }

    Ok(blocks)
}

/// Reads and parses a data file, distinguishing a missing file from a
/// malformed one.
pub fn read_blocks(path: &Path) -> Result<Vec<Block>, DataError> {
    if !path.exists() {
        return Err(DataError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_blocks(&content)
}

const DEFAULT_QUESTS: &str = "\
QUEST_ID: village_rats
TITLE: Rats in the Cellar
DESCRIPTION: Clear the rats out of the innkeeper's cellar.
REWARD_XP: 50
REWARD_GOLD: 25
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: missing_caravan
TITLE: The Missing Caravan
DESCRIPTION: Find out what happened to the merchant caravan on the north road.
REWARD_XP: 60
REWARD_GOLD: 30
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: goblin_menace
TITLE: The Goblin Menace
DESCRIPTION: Drive the goblins away from the village outskirts.
REWARD_XP: 120
REWARD_GOLD: 60
REQUIRED_LEVEL: 2
PREREQUISITE: village_rats

QUEST_ID: temple_offering
TITLE: Offering for the Temple
DESCRIPTION: Deliver the harvest offering to the hillside temple.
REWARD_XP: 150
REWARD_GOLD: 80
REQUIRED_LEVEL: 3
PREREQUISITE: NONE

QUEST_ID: orc_warband
TITLE: The Orc Warband
DESCRIPTION: Scatter the warband massing in the eastern hills.
REWARD_XP: 250
REWARD_GOLD: 120
REQUIRED_LEVEL: 4
PREREQUISITE: goblin_menace

QUEST_ID: dragon_rumors
TITLE: Rumors of a Dragon
DESCRIPTION: Confront the beast said to nest atop Cinder Peak.
REWARD_XP: 500
REWARD_GOLD: 250
REQUIRED_LEVEL: 6
PREREQUISITE: orc_warband
";

const DEFAULT_ITEMS: &str = "\
ITEM_ID: health_potion
NAME: Health Potion
TYPE: consumable
EFFECT: health:50
COST: 25
DESCRIPTION: Restores 50 health points.

ITEM_ID: elixir_of_might
NAME: Elixir of Might
TYPE: consumable
EFFECT: strength:2
COST: 150
DESCRIPTION: Permanently hardens the drinker's muscles.

ITEM_ID: iron_sword
NAME: Iron Sword
TYPE: weapon
EFFECT: strength:10
COST: 100
DESCRIPTION: A sturdy iron sword.

ITEM_ID: steel_sword
NAME: Steel Sword
TYPE: weapon
EFFECT: strength:18
COST: 250
DESCRIPTION: Folded steel, keen and balanced.

ITEM_ID: leather_armor
NAME: Leather Armor
TYPE: armor
EFFECT: max_health:20
COST: 80
DESCRIPTION: Boiled leather cuirass.

ITEM_ID: plate_armor
NAME: Plate Armor
TYPE: armor
EFFECT: max_health:50
COST: 220
DESCRIPTION: Full plate, dented but dependable.
";

pub fn quests_file(data_dir: &Path) -> PathBuf {
    data_dir.join("quests.txt")
}

pub fn items_file(data_dir: &Path) -> PathBuf {
    data_dir.join("items.txt")
}

/// Writes the starter quest and item files if they are not already present.
pub fn ensure_default_data_files(data_dir: &Path) -> Result<(), DataError> {
    fs::create_dir_all(data_dir)?;
    let quests = quests_file(data_dir);
    if !quests.exists() {
        fs::write(&quests, DEFAULT_QUESTS)?;
    }
    let items = items_file(data_dir);
    if !items.exists() {
        fs::write(&items, DEFAULT_ITEMS)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_splits_on_blank_lines() {
        let blocks = parse_blocks("A: 1\nB: two\n\nA: 3\n").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].get("a").unwrap(), "1");
        assert_eq!(blocks[0].get("b").unwrap(), "two");
        assert_eq!(blocks[1].get("a").unwrap(), "3");
    }

    #[test]
    fn test_parse_blocks_keys_are_case_insensitive() {
        let blocks = parse_blocks("QUEST_ID: q1\n").unwrap();
        assert_eq!(blocks[0].get("quest_id").unwrap(), "q1");
    }

    #[test]
    fn test_parse_blocks_value_may_contain_colons() {
        let blocks = parse_blocks("EFFECT: health:50\n").unwrap();
        assert_eq!(blocks[0].get("effect").unwrap(), "health:50");
    }

    #[test]
    fn test_parse_blocks_rejects_bad_line() {
        assert!(matches!(
            parse_blocks("not a field line\n"),
            Err(DataError::InvalidLine(_))
        ));
    }

    #[test]
    fn test_block_get_u32() {
        let blocks = parse_blocks("COST: 25\nNAME: Potion\n").unwrap();
        assert_eq!(blocks[0].get_u32("cost").unwrap(), 25);
        assert!(matches!(
            blocks[0].get_u32("name"),
            Err(DataError::InvalidInteger { .. })
        ));
        assert!(matches!(
            blocks[0].get_u32("missing"),
            Err(DataError::MissingField(_))
        ));
    }

    #[test]
    fn test_read_blocks_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        assert!(matches!(
            read_blocks(&path),
            Err(DataError::MissingFile(_))
        ));
    }

    #[test]
    fn test_ensure_default_data_files_creates_both() {
        let dir = tempfile::tempdir().unwrap();
        ensure_default_data_files(dir.path()).unwrap();
        assert!(quests_file(dir.path()).exists());
        assert!(items_file(dir.path()).exists());

        // Defaults must parse
        let quests = read_blocks(&quests_file(dir.path())).unwrap();
        assert_eq!(quests.len(), 6);
        let items = read_blocks(&items_file(dir.path())).unwrap();
        assert_eq!(items.len(), 6);
    }
}
