//! The character record shared by combat, quests, and the inventory.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::character::CharacterError;

/// The four playable classes. Immutable once a character is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

/// Starting stats for a class.
#[derive(Debug, Clone, Copy)]
pub struct BaseStats {
    pub health: u32,
    pub strength: u32,
    pub magic: u32,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 4] {
        [
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Cleric,
        ]
    }

    pub fn base_stats(self) -> BaseStats {
        match self {
            CharacterClass::Warrior => BaseStats {
                health: 120,
                strength: 15,
                magic: 5,
            },
            CharacterClass::Mage => BaseStats {
                health: 80,
                strength: 8,
                magic: 20,
            },
            CharacterClass::Rogue => BaseStats {
                health: 90,
                strength: 12,
                magic: 10,
            },
            CharacterClass::Cleric => BaseStats {
                health: 100,
                strength: 10,
                magic: 15,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = CharacterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warrior" => Ok(CharacterClass::Warrior),
            "mage" => Ok(CharacterClass::Mage),
            "rogue" => Ok(CharacterClass::Rogue),
            "cleric" => Ok(CharacterClass::Cleric),
            _ => Err(CharacterError::InvalidClass(s.to_string())),
        }
    }
}

/// A player character. Mutated by combat, quests, and the inventory while a
/// session runs; persisted between sessions by [`CharacterManager`].
///
/// [`CharacterManager`]: crate::character::CharacterManager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub experience: u32,
    pub gold: u32,
    pub inventory: Vec<String>,
    #[serde(default)]
    pub equipped_weapon: Option<String>,
    #[serde(default)]
    pub equipped_armor: Option<String>,
    pub active_quests: Vec<String>,
    pub completed_quests: Vec<String>,
}

impl Character {
    pub fn new(name: String, class: CharacterClass) -> Self {
        let base = class.base_stats();
        Self {
            name,
            class,
            level: STARTING_LEVEL,
            health: base.health,
            max_health: base.health,
            strength: base.strength,
            magic: base.magic,
            experience: 0,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
        }
    }

    /// XP still required to finish the current level.
    pub fn xp_to_next_level(&self) -> u32 {
        self.level * XP_PER_LEVEL_FACTOR
    }

    /// Credits experience and processes level-ups. The threshold for a level
    /// is consumed before the level increments, so one large reward can
    /// cascade through several levels. Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut levels_gained = 0;

        while self.experience >= self.xp_to_next_level() {
            let needed = self.xp_to_next_level();
            self.experience -= needed;
            self.level += 1;
            self.max_health += LEVEL_UP_HEALTH_BONUS;
            self.strength += LEVEL_UP_STRENGTH_BONUS;
            self.magic += LEVEL_UP_MAGIC_BONUS;
            self.health = self.max_health;
            levels_gained += 1;
        }

        levels_gained
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold += amount;
    }

    /// Deducts gold, refusing to go negative.
    pub fn spend_gold(&mut self, amount: u32) -> Result<(), CharacterError> {
        if amount > self.gold {
            return Err(CharacterError::InsufficientGold {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Heals up to `max_health`. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Applies damage, clamping health at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Brings a dead character back at half health. No effect on the living.
    pub fn revive(&mut self) -> bool {
        if !self.is_dead() {
            return false;
        }
        self.health = self.max_health / REVIVE_HEALTH_DIVISOR;
        true
    }

    pub fn has_active_quest(&self, quest_id: &str) -> bool {
        self.active_quests.iter().any(|q| q == quest_id)
    }

    pub fn has_completed_quest(&self, quest_id: &str) -> bool {
        self.completed_quests.iter().any(|q| q == quest_id)
    }
}
