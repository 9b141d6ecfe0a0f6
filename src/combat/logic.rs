//! Turn-based battle resolution.
//!
//! A [`Battle`] exclusively borrows the character for one encounter. Turns
//! alternate player then enemy; either side reaching zero health ends the
//! battle immediately in the opponent's favor. Escape rolls come from an
//! injected RNG so tests can force both outcomes.

use rand::Rng;

use crate::character::{Character, CharacterClass};
use crate::combat::types::Enemy;
use crate::combat::CombatError;
use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    Active,
    PlayerWon,
    EnemyWon,
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleWinner {
    Player,
    Enemy,
}

/// Result of a finished battle. Rewards are zero unless the player won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner: BattleWinner,
    pub xp_gained: u32,
    pub gold_gained: u32,
}

/// What a special ability did when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityEffect {
    Damage(u32),
    Heal(u32),
}

#[derive(Debug, Clone)]
pub struct AbilityOutcome {
    pub ability_name: &'static str,
    pub effect: AbilityEffect,
    pub description: String,
}

/// Uniform ability signature: pure over (attacker, defender), the battle
/// applies the returned effect.
pub type AbilityFn = fn(&Character, &Enemy) -> AbilityOutcome;

/// Capability lookup for class specials. Every current class has one; the
/// `Option` is the seam for classes without.
pub fn special_ability(class: CharacterClass) -> Option<AbilityFn> {
    match class {
        CharacterClass::Warrior => Some(power_strike),
        CharacterClass::Mage => Some(fireball),
        CharacterClass::Rogue => Some(critical_strike),
        CharacterClass::Cleric => Some(divine_heal),
    }
}

/// Core damage formula: `max(1, mult * attacker_stat - defender_stat / 4)`
/// with truncating division on the defense term. The floor of 1 keeps every
/// battle finite.
fn scaled_damage(multiplier: u32, attacker_stat: u32, defender_stat: u32) -> u32 {
    (multiplier * attacker_stat)
        .saturating_sub(defender_stat / DEFENSE_DIVISOR)
        .max(MIN_DAMAGE)
}

/// Basic attack damage for any attacker/defender strength pair.
pub fn attack_damage(attacker_strength: u32, defender_strength: u32) -> u32 {
    scaled_damage(1, attacker_strength, defender_strength)
}

fn power_strike(attacker: &Character, defender: &Enemy) -> AbilityOutcome {
    let damage = scaled_damage(2, attacker.strength, defender.strength);
    AbilityOutcome {
        ability_name: "Power Strike",
        effect: AbilityEffect::Damage(damage),
        description: format!("{} uses Power Strike for {} damage!", attacker.name, damage),
    }
}

fn fireball(attacker: &Character, defender: &Enemy) -> AbilityOutcome {
    let damage = scaled_damage(2, attacker.magic, defender.magic);
    AbilityOutcome {
        ability_name: "Fireball",
        effect: AbilityEffect::Damage(damage),
        description: format!("{} hurls a Fireball for {} damage!", attacker.name, damage),
    }
}

fn critical_strike(attacker: &Character, defender: &Enemy) -> AbilityOutcome {
    let damage = scaled_damage(3, attacker.strength, defender.strength);
    AbilityOutcome {
        ability_name: "Critical Strike",
        effect: AbilityEffect::Damage(damage),
        description: format!(
            "{} lands a Critical Strike for {} damage!",
            attacker.name, damage
        ),
    }
}

fn divine_heal(attacker: &Character, _defender: &Enemy) -> AbilityOutcome {
    AbilityOutcome {
        ability_name: "Heal",
        effect: AbilityEffect::Heal(CLERIC_HEAL_AMOUNT),
        description: format!("{} heals for {} health!", attacker.name, CLERIC_HEAL_AMOUNT),
    }
}

/// One encounter between a character and an enemy.
///
/// Owns the enemy and exclusively borrows the character for the battle's
/// lifetime, so nothing else can mutate either while combat is active.
pub struct Battle<'a> {
    character: &'a mut Character,
    enemy: Enemy,
    turn_counter: u32,
    status: BattleStatus,
}

impl<'a> Battle<'a> {
    pub fn new(character: &'a mut Character, enemy: Enemy) -> Self {
        Self {
            character,
            enemy,
            turn_counter: 0,
            status: BattleStatus::Active,
        }
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    /// Full player+enemy rounds completed so far.
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn character(&self) -> &Character {
        self.character
    }

    fn ensure_active(&self) -> Result<(), CombatError> {
        match self.status {
            BattleStatus::Active => Ok(()),
            _ => Err(CombatError::BattleNotActive),
        }
    }

    fn check_battle_end(&mut self) {
        if !self.enemy.is_alive() {
            self.status = BattleStatus::PlayerWon;
        } else if self.character.is_dead() {
            self.status = BattleStatus::EnemyWon;
        }
    }

    /// Player basic attack. Returns the damage dealt.
    pub fn resolve_player_turn(&mut self) -> Result<u32, CombatError> {
        self.ensure_active()?;
        let damage = attack_damage(self.character.strength, self.enemy.strength);
        self.enemy.take_damage(damage);
        self.check_battle_end();
        Ok(damage)
    }

    /// Player special ability, the alternative to a basic attack.
    pub fn use_special_ability(&mut self) -> Result<AbilityOutcome, CombatError> {
        self.ensure_active()?;
        let ability = special_ability(self.character.class)
            .ok_or(CombatError::NoAbilityForClass(self.character.class))?;
        let outcome = ability(self.character, &self.enemy);
        match outcome.effect {
            AbilityEffect::Damage(damage) => {
                self.enemy.take_damage(damage);
                self.check_battle_end();
            }
            AbilityEffect::Heal(amount) => {
                self.character.heal(amount);
            }
        }
        Ok(outcome)
    }

    /// Enemy basic attack. Returns the damage dealt.
    pub fn resolve_enemy_turn(&mut self) -> Result<u32, CombatError> {
        self.ensure_active()?;
        let damage = attack_damage(self.enemy.strength, self.character.strength);
        self.character.take_damage(damage);
        self.check_battle_end();
        Ok(damage)
    }

    /// Escape roll: 50% per attempt. Success ends the battle with no rewards
    /// and no penalty; on failure the battle stays active and the enemy still
    /// gets its turn that round (driven by the caller).
    pub fn attempt_escape(&mut self, rng: &mut impl Rng) -> Result<bool, CombatError> {
        self.ensure_active()?;
        let roll: u32 = rng.gen_range(1..=100);
        if roll <= ESCAPE_SUCCESS_PERCENT {
            self.status = BattleStatus::Escaped;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Marks a full player+enemy round as finished. Interactive callers that
    /// drive turns themselves use this; [`Battle::run`] counts rounds itself.
    pub fn complete_round(&mut self) {
        self.turn_counter += 1;
    }

    /// Runs the battle with basic attacks until a side wins.
    ///
    /// Terminates for any stat pair: damage is at least 1 per turn and health
    /// is bounded, so one side reaches zero in finitely many rounds.
    pub fn run(&mut self) -> Result<BattleOutcome, CombatError> {
        if self.character.is_dead() {
            return Err(CombatError::CharacterIncapacitated);
        }

        while self.status == BattleStatus::Active {
            self.resolve_player_turn()?;
            if self.status != BattleStatus::Active {
                break;
            }
            self.resolve_enemy_turn()?;
            self.complete_round();
        }

        self.outcome().ok_or(CombatError::BattleNotActive)
    }

    /// Outcome of a decided battle. `None` while active or after an escape,
    /// which carries no winner and no rewards.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.status {
            BattleStatus::PlayerWon => Some(BattleOutcome {
                winner: BattleWinner::Player,
                xp_gained: self.enemy.xp_reward,
                gold_gained: self.enemy.gold_reward,
            }),
            BattleStatus::EnemyWon => Some(BattleOutcome {
                winner: BattleWinner::Enemy,
                xp_gained: 0,
                gold_gained: 0,
            }),
            BattleStatus::Active | BattleStatus::Escaped => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::{create_enemy, EnemyKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn warrior() -> Character {
        Character::new("Hero".to_string(), CharacterClass::Warrior)
    }

    #[test]
    fn test_basic_damage_warrior_vs_goblin() {
        // str 15 vs str 8: max(1, 15 - 8/4) = 13
        assert_eq!(attack_damage(15, 8), 13);
    }

    #[test]
    fn test_damage_never_below_one() {
        assert_eq!(attack_damage(1, 100), 1);
        assert_eq!(attack_damage(0, 0), 1);
        for attacker in 0..40 {
            for defender in 0..40 {
                assert!(attack_damage(attacker, defender) >= 1);
            }
        }
    }

    #[test]
    fn test_power_strike_doubles_strength() {
        let hero = warrior();
        let goblin = create_enemy(EnemyKind::Goblin);
        let outcome = power_strike(&hero, &goblin);
        // max(1, 2*15 - 8/4) = 28
        assert_eq!(outcome.effect, AbilityEffect::Damage(28));
        assert_eq!(outcome.ability_name, "Power Strike");
    }

    #[test]
    fn test_fireball_uses_magic_stats() {
        let mage = Character::new("Mira".to_string(), CharacterClass::Mage);
        let dragon = create_enemy(EnemyKind::Dragon);
        let outcome = fireball(&mage, &dragon);
        // max(1, 2*20 - 15/4) = 37
        assert_eq!(outcome.effect, AbilityEffect::Damage(37));
    }

    #[test]
    fn test_critical_strike_triples_strength() {
        let rogue = Character::new("Silk".to_string(), CharacterClass::Rogue);
        let orc = create_enemy(EnemyKind::Orc);
        let outcome = critical_strike(&rogue, &orc);
        // max(1, 3*12 - 12/4) = 33
        assert_eq!(outcome.effect, AbilityEffect::Damage(33));
    }

    #[test]
    fn test_every_class_has_an_ability() {
        for class in CharacterClass::all() {
            assert!(special_ability(class).is_some());
        }
    }

    #[test]
    fn test_cleric_heal_caps_at_max_health() {
        let mut cleric = Character::new("Ada".to_string(), CharacterClass::Cleric);
        cleric.take_damage(10);
        let mut battle = Battle::new(&mut cleric, create_enemy(EnemyKind::Goblin));
        let outcome = battle.use_special_ability().unwrap();
        assert_eq!(outcome.effect, AbilityEffect::Heal(30));
        assert_eq!(battle.character().health, battle.character().max_health);
    }

    #[test]
    fn test_run_battle_player_wins_and_rewards() {
        let mut hero = warrior();
        let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));
        let outcome = battle.run().unwrap();
        assert_eq!(outcome.winner, BattleWinner::Player);
        assert_eq!(outcome.xp_gained, 25);
        assert_eq!(outcome.gold_gained, 10);
        assert_eq!(battle.status(), BattleStatus::PlayerWon);
        assert!(battle.turn_counter() > 0);
    }

    #[test]
    fn test_run_battle_enemy_wins_with_zero_rewards() {
        let mut weakling = warrior();
        weakling.strength = 1;
        weakling.health = 5;
        let mut battle = Battle::new(&mut weakling, create_enemy(EnemyKind::Dragon));
        let outcome = battle.run().unwrap();
        assert_eq!(outcome.winner, BattleWinner::Enemy);
        assert_eq!(outcome.xp_gained, 0);
        assert_eq!(outcome.gold_gained, 0);
    }

    #[test]
    fn test_run_battle_rejects_dead_character() {
        let mut hero = warrior();
        hero.take_damage(1000);
        let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));
        assert!(matches!(
            battle.run(),
            Err(CombatError::CharacterIncapacitated)
        ));
    }

    #[test]
    fn test_turns_fail_once_battle_is_over() {
        let mut hero = warrior();
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
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            battle.attempt_escape(&mut rng),
            Err(CombatError::BattleNotActive)
        ));
    }

    #[test]
    fn test_no_further_action_after_killing_blow() {
        let mut hero = warrior();
        hero.strength = 1000;
        let health_before = hero.max_health;
        let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));
        battle.run().unwrap();
        // Enemy died on the player's turn, so the enemy never acted
        assert_eq!(battle.turn_counter(), 0);
        assert_eq!(battle.character().health, health_before);
    }

    #[test]
    fn test_escape_transitions_to_escaped_without_rewards() {
        let mut hero = warrior();
        let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Orc));
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        // Roll until the 50% escape lands; each failure leaves the battle active.
        for _ in 0..200 {
            if battle.attempt_escape(&mut rng).unwrap() {
                break;
            }
            assert_eq!(battle.status(), BattleStatus::Active);
        }

        assert_eq!(battle.status(), BattleStatus::Escaped);
        assert!(battle.outcome().is_none());
    }

    #[test]
    fn test_escape_roll_produces_both_results() {
        let mut successes = 0;
        let mut failures = 0;
        for seed in 0..32 {
            let mut hero = warrior();
            let mut battle = Battle::new(&mut hero, create_enemy(EnemyKind::Goblin));
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            if battle.attempt_escape(&mut rng).unwrap() {
                successes += 1;
            } else {
                failures += 1;
            }
        }
        assert!(successes > 0);
        assert!(failures > 0);
    }
}
