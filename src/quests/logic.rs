//! The quest graph manager: eligibility, accept/complete/abandon transitions,
//! prerequisite chains, and aggregate progress statistics.

use crate::character::Character;
use crate::quests::types::{Quest, QuestCatalog};
use crate::quests::QuestError;

/// XP and gold credited (or creditable) from quests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuestRewards {
    pub xp: u32,
    pub gold: u32,
}

/// Snapshot of a character's overall quest progress.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestProgress {
    pub active_count: usize,
    pub completed_count: usize,
    pub completion_percentage: f64,
    pub total_rewards: QuestRewards,
}

/// Composite eligibility predicate. Never errors: any unmet condition
/// (unknown id, level gate, prerequisite, already taken) yields `false`.
pub fn is_eligible(character: &Character, catalog: &QuestCatalog, quest_id: &str) -> bool {
    let quest = match catalog.get(quest_id) {
        Some(q) => q,
        None => return false,
    };
    if character.level < quest.required_level {
        return false;
    }
    if let Some(prereq) = &quest.prerequisite {
        if !character.has_completed_quest(prereq) {
            return false;
        }
    }
    !character.has_completed_quest(quest_id) && !character.has_active_quest(quest_id)
}

/// Accepts exactly the requested quest, reporting the first unmet condition.
pub fn accept_quest(
    character: &mut Character,
    catalog: &QuestCatalog,
    quest_id: &str,
) -> Result<(), QuestError> {
    let quest = catalog
        .get(quest_id)
        .ok_or_else(|| QuestError::QuestNotFound(quest_id.to_string()))?;

    if character.level < quest.required_level {
        return Err(QuestError::LevelTooLow {
            quest_id: quest_id.to_string(),
            required: quest.required_level,
            actual: character.level,
        });
    }
    if let Some(prereq) = &quest.prerequisite {
        if !character.has_completed_quest(prereq) {
            return Err(QuestError::PrerequisiteUnmet {
                quest_id: quest_id.to_string(),
                prerequisite: prereq.clone(),
            });
        }
    }
    if character.has_completed_quest(quest_id) {
        return Err(QuestError::QuestAlreadyCompleted(quest_id.to_string()));
    }
    if character.has_active_quest(quest_id) {
        return Err(QuestError::QuestAlreadyActive(quest_id.to_string()));
    }

    character.active_quests.push(quest_id.to_string());
    Ok(())
}

/// Completes an active quest: moves it to the completed set and credits the
/// rewards through the character's progression (XP may cascade level-ups).
pub fn complete_quest(
    character: &mut Character,
    catalog: &QuestCatalog,
    quest_id: &str,
) -> Result<QuestRewards, QuestError> {
    let quest = catalog
        .get(quest_id)
        .ok_or_else(|| QuestError::QuestNotFound(quest_id.to_string()))?;

    let position = character
        .active_quests
        .iter()
        .position(|q| q == quest_id)
        .ok_or_else(|| QuestError::QuestNotActive(quest_id.to_string()))?;

    character.active_quests.remove(position);
    character.completed_quests.push(quest_id.to_string());
    character.gain_experience(quest.reward_xp);
    character.add_gold(quest.reward_gold);

    Ok(QuestRewards {
        xp: quest.reward_xp,
        gold: quest.reward_gold,
    })
}

/// Drops a quest from the active set. No rewards, no penalty; the quest can
/// be accepted again if its conditions still hold.
pub fn abandon_quest(character: &mut Character, quest_id: &str) -> Result<(), QuestError> {
    let position = character
        .active_quests
        .iter()
        .position(|q| q == quest_id)
        .ok_or_else(|| QuestError::QuestNotActive(quest_id.to_string()))?;
    character.active_quests.remove(position);
    Ok(())
}

/// The ordered prerequisite ancestry of a quest, earliest ancestor first and
/// the quest itself last. Errors if the quest or any ancestor is missing.
pub fn prerequisite_chain(
    catalog: &QuestCatalog,
    quest_id: &str,
) -> Result<Vec<String>, QuestError> {
    let mut chain = Vec::new();
    let mut current = Some(quest_id.to_string());

    while let Some(id) = current {
        let quest = catalog
            .get(&id)
            .ok_or_else(|| QuestError::QuestNotFound(id.clone()))?;
        chain.push(id);
        current = quest.prerequisite.clone();
    }

    chain.reverse();
    Ok(chain)
}

/// Percentage of the catalog the character has completed. An empty catalog is
/// an explicit error rather than a division by zero.
pub fn completion_percentage(
    character: &Character,
    catalog: &QuestCatalog,
) -> Result<f64, QuestError> {
    if catalog.is_empty() {
        return Err(QuestError::EmptyCatalog);
    }
    Ok(100.0 * character.completed_quests.len() as f64 / catalog.len() as f64)
}

/// Sums rewards over completed quests. Ids no longer in the catalog (removed
/// content) are skipped silently.
pub fn total_rewards_earned(character: &Character, catalog: &QuestCatalog) -> QuestRewards {
    let mut totals = QuestRewards::default();
    for quest_id in &character.completed_quests {
        if let Some(quest) = catalog.get(quest_id) {
            totals.xp += quest.reward_xp;
            totals.gold += quest.reward_gold;
        }
    }
    totals
}

/// All quests the character could accept right now, in catalog order.
pub fn available_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    catalog
        .iter()
        .filter(|q| is_eligible(character, catalog, &q.quest_id))
        .collect()
}

/// Catalog records for the character's active quests, skipping stale ids.
pub fn active_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .active_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

/// Catalog records for the character's completed quests, skipping stale ids.
pub fn completed_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .completed_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

/// Aggregate progress snapshot for display.
pub fn quest_progress(
    character: &Character,
    catalog: &QuestCatalog,
) -> Result<QuestProgress, QuestError> {
    Ok(QuestProgress {
        active_count: character.active_quests.len(),
        completed_count: character.completed_quests.len(),
        completion_percentage: completion_percentage(character, catalog)?,
        total_rewards: total_rewards_earned(character, catalog),
    })
}
