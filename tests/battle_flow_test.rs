//! Integration test: combat flow
//!
//! Drives full battles through the public API the way the binary does:
//! spawn a level-appropriate enemy, trade turns, apply rewards, and
//! verify death, escape, and level-up behavior end to end.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use quest_chronicles::combat::{
    create_enemy, select_enemy_for_level, AbilityEffect, Battle, BattleStatus, BattleWinner,
    CombatError, EnemyKind,
};
use quest_chronicles::items::ItemCatalog;
use quest_chronicles::quests::QuestCatalog;
use quest_chronicles::{Character, CharacterClass, CharacterManager, GameSession};

fn warrior(name: &str) -> Character {
    Character::new(name.to_string(), CharacterClass::Warrior)
}

fn empty_session(character: Character) -> GameSession {
    GameSession::new(character, QuestCatalog::default(), ItemCatalog::default())
}

// =============================================================================
// Full battle resolution
// =============================================================================

#[test]
fn test_warrior_defeats_goblin_with_basic_attacks() {
    let mut hero = warrior("Brand");
    let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));

    let outcome = battle.run().unwrap();

    // 13 damage per swing kills a 50 HP goblin in 4 turns, so the goblin
    // swings back 3 times for 5 each.
    assert_eq!(outcome.winner, BattleWinner::Player);
    assert_eq!(outcome.xp_gained, 25);
    assert_eq!(outcome.gold_gained, 10);
    assert_eq!(battle.turn_counter(), 3);
    assert_eq!(battle.character().health, 105);
}

#[test]
fn test_level_one_hero_falls_to_dragon() {
    let mut hero = warrior("Brand");
    let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Dragon));

    let outcome = battle.run().unwrap();

    assert_eq!(outcome.winner, BattleWinner::Enemy);
    assert_eq!(outcome.xp_gained, 0);
    assert_eq!(outcome.gold_gained, 0);
    assert!(hero.is_dead());
}

#[test]
fn test_dead_character_cannot_start_fighting() {
    let mut hero = warrior("Brand");
    hero.take_damage(hero.health);

    let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));
    assert!(matches!(
        battle.run(),
        Err(CombatError::CharacterIncapacitated)
    ));
}

// =============================================================================
// Interactive turns and abilities
// =============================================================================

#[test]
fn test_mage_fireball_burns_down_goblin() {
    let mut hero = Character::new("Sel".to_string(), CharacterClass::Mage);
    let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));

    // Fireball: 2 * 20 magic - 2 / 4 enemy magic = 40 damage.
    let first = battle.use_special_ability().unwrap();
    assert_eq!(first.ability_name, "Fireball");
    assert_eq!(first.effect, AbilityEffect::Damage(40));
    assert_eq!(battle.enemy().health, 10);

    battle.resolve_enemy_turn().unwrap();
    battle.complete_round();

    let second = battle.use_special_ability().unwrap();
    assert_eq!(second.effect, AbilityEffect::Damage(40));
    assert_eq!(battle.status(), BattleStatus::PlayerWon);
    assert_eq!(battle.turn_counter(), 1);
}

#[test]
fn test_cleric_heal_restores_up_to_cap() {
    let mut hero = Character::new("Vess".to_string(), CharacterClass::Cleric);
    hero.take_damage(40);
    let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));

    let outcome = battle.use_special_ability().unwrap();
    assert_eq!(outcome.effect, AbilityEffect::Heal(30));
    // 60 + 30 stays under the 100 max.
    assert_eq!(battle.character().health, 90);
    // Healing does not touch the enemy.
    assert_eq!(battle.enemy().health, battle.enemy().max_health);
    assert_eq!(battle.status(), BattleStatus::Active);
}

#[test]
fn test_no_turns_accepted_after_battle_ends() {
    let mut hero = warrior("Brand");
    let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));
    battle.run().unwrap();

    assert!(matches!(
        battle.resolve_player_turn(),
        Err(CombatError::BattleNotActive)
    ));
    assert!(matches!(
        battle.resolve_enemy_turn(),
        Err(CombatError::BattleNotActive)
    ));
    assert!(matches!(
        battle.use_special_ability(),
        Err(CombatError::BattleNotActive)
    ));
}

// =============================================================================
// Escape
// =============================================================================

#[test]
fn test_escape_ends_battle_without_rewards() {
    let mut hero = warrior("Brand");
    let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Dragon));
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let escaped = loop {
        if battle.attempt_escape(&mut rng).unwrap() {
            break true;
        }
        battle.resolve_enemy_turn().unwrap();
        battle.complete_round();
        if battle.status() != BattleStatus::Active {
            break false;
        }
    };

    if escaped {
        assert_eq!(battle.status(), BattleStatus::Escaped);
        assert!(battle.outcome().is_none());
        assert!(matches!(
            battle.attempt_escape(&mut rng),
            Err(CombatError::BattleNotActive)
        ));
    } else {
        // The dragon got there first. Still a decided battle, no rewards.
        assert_eq!(battle.status(), BattleStatus::EnemyWon);
    }
}

// =============================================================================
// Session-level flow: encounters, rewards, level-ups, persistence
// =============================================================================

#[test]
fn test_spawn_encounter_matches_level_tier() {
    let mut session = empty_session(warrior("Brand"));

    assert_eq!(session.spawn_encounter().unwrap().name, "Goblin");
    session.character.level = 4;
    assert_eq!(session.spawn_encounter().unwrap().name, "Orc");
    session.character.level = 9;
    assert_eq!(session.spawn_encounter().unwrap().name, "Dragon");

    assert_eq!(select_enemy_for_level(2).unwrap(), EnemyKind::Goblin);
    assert_eq!(select_enemy_for_level(3).unwrap(), EnemyKind::Orc);
    assert_eq!(select_enemy_for_level(6).unwrap(), EnemyKind::Dragon);
}

#[test]
fn test_battle_rewards_feed_level_progression() {
    let mut session = empty_session(warrior("Brand"));

    // Four goblin wins: 100 XP total, exactly one level.
    for _ in 0..4 {
        let outcome = session.fight_for_level().unwrap();
        assert_eq!(outcome.winner, BattleWinner::Player);
        session.character.health = session.character.max_health;
    }

    assert_eq!(session.character.level, 2);
    assert_eq!(session.character.experience, 0);
    assert_eq!(session.character.max_health, 130);
    assert_eq!(session.character.strength, 17);
    assert_eq!(session.character.gold, 140);
    // Leveling heals to the new maximum.
    assert_eq!(session.character.health, session.character.max_health);
}

#[test]
fn test_revive_after_defeat_costs_half_health() {
    let mut hero = warrior("Brand");
    let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Dragon));
    battle.run().unwrap();

    assert!(hero.is_dead());
    assert!(hero.revive());
    assert_eq!(hero.health, hero.max_health / 2);
    // Reviving the living is a no-op.
    assert!(!hero.revive());
}

#[test]
fn test_battle_gains_survive_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CharacterManager::with_dir(dir.path().to_path_buf()).unwrap();

    let mut session = empty_session(warrior("Brand"));
    session.fight_for_level().unwrap();
    manager.save_character(&session.character).unwrap();

    let loaded = manager.load_character("Brand").unwrap();
    assert_eq!(loaded.experience, session.character.experience);
    assert_eq!(loaded.gold, session.character.gold);
    assert_eq!(loaded.health, session.character.health);
}
