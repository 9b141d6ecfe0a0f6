//! The per-session game context.
//!
//! One `GameSession` owns the character and the two read-only catalogs for
//! the lifetime of a play session. Session state travels through this
//! context explicitly rather than through globals.

use crate::character::Character;
use crate::combat::{create_enemy, select_enemy_for_level, Battle, BattleOutcome, CombatError};
use crate::items::ItemCatalog;
use crate::quests::QuestCatalog;

pub struct GameSession {
    pub character: Character,
    pub quests: QuestCatalog,
    pub items: ItemCatalog,
}

impl GameSession {
    pub fn new(character: Character, quests: QuestCatalog, items: ItemCatalog) -> Self {
        Self {
            character,
            quests,
            items,
        }
    }

    /// Spawns a level-appropriate enemy for the session character.
    pub fn spawn_encounter(&self) -> Result<crate::combat::Enemy, CombatError> {
        let kind = select_enemy_for_level(self.character.level)?;
        Ok(create_enemy(kind))
    }

    /// Auto-resolves a battle against a level-appropriate enemy with basic
    /// attacks, then credits any rewards.
    pub fn fight_for_level(&mut self) -> Result<BattleOutcome, CombatError> {
        let enemy = self.spawn_encounter()?;
        let mut battle = Battle::new(&mut self.character, enemy);
        let outcome = battle.run()?;
        self.apply_battle_rewards(&outcome);
        Ok(outcome)
    }

    /// Credits a won battle's XP (cascading level-ups) and gold.
    pub fn apply_battle_rewards(&mut self, outcome: &BattleOutcome) {
        self.character.gain_experience(outcome.xp_gained);
        self.character.add_gold(outcome.gold_gained);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::combat::BattleWinner;

    fn session() -> GameSession {
        GameSession::new(
            Character::new("Hero".to_string(), CharacterClass::Warrior),
            QuestCatalog::default(),
            ItemCatalog::default(),
        )
    }

    #[test]
    fn test_spawn_encounter_matches_level() {
        let s = session();
        let enemy = s.spawn_encounter().unwrap();
        assert_eq!(enemy.name, "Goblin");
    }

    #[test]
    fn test_fight_for_level_applies_rewards() {
        let mut s = session();
        let outcome = s.fight_for_level().unwrap();
        assert_eq!(outcome.winner, BattleWinner::Player);
        assert_eq!(s.character.experience, 25);
        assert_eq!(s.character.gold, 110);
    }

    #[test]
    fn test_fight_for_level_rejects_dead_character() {
        let mut s = session();
        s.character.take_damage(1000);
        assert!(matches!(
            s.fight_for_level(),
            Err(CombatError::CharacterIncapacitated)
        ));
        assert_eq!(s.character.experience, 0);
    }
}
