//! Enemy definitions and the static spawn table.

use std::fmt;
use std::str::FromStr;

use crate::combat::CombatError;
use crate::core::constants::{GOBLIN_MAX_LEVEL, ORC_MAX_LEVEL};

/// The fixed enemy roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

impl EnemyKind {
    pub fn all() -> [EnemyKind; 3] {
        [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Dragon]
    }

    fn template(self) -> EnemyTemplate {
        match self {
            EnemyKind::Goblin => EnemyTemplate {
                name: "Goblin",
                health: 50,
                strength: 8,
                magic: 2,
                xp_reward: 25,
                gold_reward: 10,
            },
            EnemyKind::Orc => EnemyTemplate {
                name: "Orc",
                health: 80,
                strength: 12,
                magic: 5,
                xp_reward: 50,
                gold_reward: 25,
            },
            EnemyKind::Dragon => EnemyTemplate {
                name: "Dragon",
                health: 200,
                strength: 25,
                magic: 15,
                xp_reward: 200,
                gold_reward: 100,
            },
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template().name)
    }
}

impl FromStr for EnemyKind {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goblin" => Ok(EnemyKind::Goblin),
            "orc" => Ok(EnemyKind::Orc),
            "dragon" => Ok(EnemyKind::Dragon),
            _ => Err(CombatError::UnknownEnemyKind(s.to_string())),
        }
    }
}

struct EnemyTemplate {
    name: &'static str,
    health: u32,
    strength: u32,
    magic: u32,
    xp_reward: u32,
    gold_reward: u32,
}

/// One opponent, created fresh per battle and discarded afterward.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

/// Instantiates an enemy from the static table with full health.
pub fn create_enemy(kind: EnemyKind) -> Enemy {
    let template = kind.template();
    Enemy {
        name: template.name.to_string(),
        health: template.health,
        max_health: template.health,
        strength: template.strength,
        magic: template.magic,
        xp_reward: template.xp_reward,
        gold_reward: template.gold_reward,
    }
}

/// Picks the enemy kind for a character level: 1-2 goblin, 3-5 orc, 6+ dragon.
/// Only the kind depends on level; the instance itself is always the same.
pub fn select_enemy_for_level(level: u32) -> Result<EnemyKind, CombatError> {
    if level < 1 {
        return Err(CombatError::InvalidLevel(level));
    }
    if level <= GOBLIN_MAX_LEVEL {
        Ok(EnemyKind::Goblin)
    } else if level <= ORC_MAX_LEVEL {
        Ok(EnemyKind::Orc)
    } else {
        Ok(EnemyKind::Dragon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_enemy_goblin_stats() {
        let goblin = create_enemy(EnemyKind::Goblin);
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.health, 50);
        assert_eq!(goblin.max_health, 50);
        assert_eq!(goblin.strength, 8);
        assert_eq!(goblin.magic, 2);
        assert_eq!(goblin.xp_reward, 25);
        assert_eq!(goblin.gold_reward, 10);
        assert!(goblin.is_alive());
    }

    #[test]
    fn test_create_enemy_starts_at_full_health() {
        for kind in EnemyKind::all() {
            let enemy = create_enemy(kind);
            assert_eq!(enemy.health, enemy.max_health);
        }
    }

    #[test]
    fn test_enemy_kind_from_str() {
        assert_eq!("goblin".parse::<EnemyKind>().unwrap(), EnemyKind::Goblin);
        assert_eq!("Dragon".parse::<EnemyKind>().unwrap(), EnemyKind::Dragon);
        assert!(matches!(
            "slime".parse::<EnemyKind>(),
            Err(CombatError::UnknownEnemyKind(_))
        ));
    }

    #[test]
    fn test_take_damage_no_underflow() {
        let mut orc = create_enemy(EnemyKind::Orc);
        orc.take_damage(500);
        assert_eq!(orc.health, 0);
        assert!(!orc.is_alive());
    }

    #[test]
    fn test_select_enemy_for_level_tiers() {
        assert_eq!(select_enemy_for_level(1).unwrap(), EnemyKind::Goblin);
        assert_eq!(select_enemy_for_level(2).unwrap(), EnemyKind::Goblin);
        assert_eq!(select_enemy_for_level(3).unwrap(), EnemyKind::Orc);
        assert_eq!(select_enemy_for_level(4).unwrap(), EnemyKind::Orc);
        assert_eq!(select_enemy_for_level(5).unwrap(), EnemyKind::Orc);
        assert_eq!(select_enemy_for_level(6).unwrap(), EnemyKind::Dragon);
        assert_eq!(select_enemy_for_level(7).unwrap(), EnemyKind::Dragon);
    }

    #[test]
    fn test_select_enemy_rejects_level_zero() {
        assert!(matches!(
            select_enemy_for_level(0),
            Err(CombatError::InvalidLevel(0))
        ));
    }
}
