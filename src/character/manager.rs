//! Character persistence: one JSON save file per character.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterError};
use crate::core::constants::{MAX_INVENTORY_SIZE, SAVE_DIR_NAME, SAVE_VERSION};

#[derive(Serialize, Deserialize)]
struct CharacterSaveData {
    version: u32,
    last_save_time: i64,
    character: Character,
}

/// Summary row for the load menu.
#[derive(Debug, Clone)]
pub struct CharacterInfo {
    pub character_name: String,
    pub class_name: String,
    pub level: u32,
    pub filename: String,
    pub last_save_time: i64,
    pub is_corrupted: bool,
}

/// Saves and loads characters under the save directory
/// (`~/.quest-chronicles` by default, injectable for tests).
pub struct CharacterManager {
    save_dir: PathBuf,
}

impl CharacterManager {
    pub fn new() -> Result<Self, CharacterError> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            CharacterError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine home directory",
            ))
        })?;
        Self::with_dir(home_dir.join(SAVE_DIR_NAME))
    }

    pub fn with_dir(save_dir: PathBuf) -> Result<Self, CharacterError> {
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &PathBuf {
        &self.save_dir
    }

    fn save_path(&self, name: &str) -> PathBuf {
        self.save_dir.join(format!("{}.json", sanitize_name(name)))
    }

    pub fn save_character(&self, character: &Character) -> Result<(), CharacterError> {
        let save_data = CharacterSaveData {
            version: SAVE_VERSION,
            last_save_time: Utc::now().timestamp(),
            character: character.clone(),
        };
        let json = serde_json::to_string_pretty(&save_data).map_err(|e| {
            CharacterError::InvalidSaveData(format!("could not serialize save: {}", e))
        })?;
        fs::write(self.save_path(&character.name), json)?;
        Ok(())
    }

    pub fn load_character(&self, name: &str) -> Result<Character, CharacterError> {
        let path = self.save_path(name);
        if !path.exists() {
            return Err(CharacterError::NotFound(name.to_string()));
        }
        let json = fs::read_to_string(&path)?;
        let save_data: CharacterSaveData =
            serde_json::from_str(&json).map_err(|e| CharacterError::SaveCorrupted {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        validate_save_data(&save_data.character)?;
        Ok(save_data.character)
    }

    pub fn delete_character(&self, name: &str) -> Result<(), CharacterError> {
        let path = self.save_path(name);
        if !path.exists() {
            return Err(CharacterError::NotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Lists every save in the directory, most recently saved first.
    /// Unreadable files are included and flagged rather than dropped.
    pub fn list_characters(&self) -> Result<Vec<CharacterInfo>, CharacterError> {
        let mut characters = Vec::new();

        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let filename = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            let parsed = fs::read_to_string(&path)
                .ok()
                .and_then(|json| serde_json::from_str::<CharacterSaveData>(&json).ok())
                .filter(|data| validate_save_data(&data.character).is_ok());

            match parsed {
                Some(data) => characters.push(CharacterInfo {
                    character_name: data.character.name.clone(),
                    class_name: data.character.class.name().to_string(),
                    level: data.character.level,
                    filename,
                    last_save_time: data.last_save_time,
                    is_corrupted: false,
                }),
                None => characters.push(CharacterInfo {
                    character_name: "[CORRUPTED]".to_string(),
                    class_name: String::new(),
                    level: 0,
                    filename,
                    last_save_time: 0,
                    is_corrupted: true,
                }),
            }
        }

        characters.sort_by(|a, b| b.last_save_time.cmp(&a.last_save_time));
        Ok(characters)
    }
}

/// Rejects save data that violates the character invariants.
fn validate_save_data(character: &Character) -> Result<(), CharacterError> {
    if character.name.trim().is_empty() {
        return Err(CharacterError::InvalidSaveData(
            "character name is empty".to_string(),
        ));
    }
    if character.level < 1 {
        return Err(CharacterError::InvalidSaveData(
            "character level below 1".to_string(),
        ));
    }
    if character.max_health == 0 {
        return Err(CharacterError::InvalidSaveData(
            "max health must be positive".to_string(),
        ));
    }
    if character.health > character.max_health {
        return Err(CharacterError::InvalidSaveData(
            "health exceeds max health".to_string(),
        ));
    }
    if character.inventory.len() > MAX_INVENTORY_SIZE {
        return Err(CharacterError::InvalidSaveData(format!(
            "inventory holds {} items, the limit is {}",
            character.inventory.len(),
            MAX_INVENTORY_SIZE
        )));
    }
    for quest_id in &character.active_quests {
        if character.completed_quests.contains(quest_id) {
            return Err(CharacterError::InvalidSaveData(format!(
                "quest '{}' is both active and completed",
                quest_id
            )));
        }
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), CharacterError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CharacterError::InvalidSaveData(
            "name cannot be empty".to_string(),
        ));
    }
    if trimmed.len() > 16 {
        return Err(CharacterError::InvalidSaveData(
            "name must be 16 characters or less".to_string(),
        ));
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');
    if !valid {
        return Err(CharacterError::InvalidSaveData(
            "name may only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        ));
    }
    Ok(())
}

pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
