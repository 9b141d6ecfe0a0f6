//! Quest catalog entries and catalog-load validation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::constants::NO_PREREQUISITE;
use crate::data::{read_blocks, Block, DataError};

/// An immutable catalog entry. `prerequisite` is `None` for root quests
/// (the `NONE` sentinel in the data files).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub quest_id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: u32,
    pub reward_gold: u32,
    pub required_level: u32,
    pub prerequisite: Option<String>,
}

impl Quest {
    pub fn from_block(block: &Block) -> Result<Self, DataError> {
        let prerequisite = block.get("prerequisite")?;
        let prerequisite = if prerequisite.eq_ignore_ascii_case(NO_PREREQUISITE) {
            None
        } else {
            Some(prerequisite.to_string())
        };

        Ok(Self {
            quest_id: block.get("quest_id")?.to_string(),
            title: block.get("title")?.to_string(),
            description: block.get("description")?.to_string(),
            reward_xp: block.get_u32("reward_xp")?,
            reward_gold: block.get_u32("reward_gold")?,
            required_level: block.get_u32("required_level")?,
            prerequisite,
        })
    }
}

/// The read-only quest catalog, keyed by quest id.
///
/// Integrity (prerequisites resolve, no cycles) is enforced here at build
/// time so the quest manager never has to re-validate per call.
#[derive(Debug, Clone, Default)]
pub struct QuestCatalog {
    quests: BTreeMap<String, Quest>,
}

impl QuestCatalog {
    /// Builds and validates a catalog from quest records.
    pub fn from_quests(quests: impl IntoIterator<Item = Quest>) -> Result<Self, DataError> {
        let catalog = Self {
            quests: quests
                .into_iter()
                .map(|q| (q.quest_id.clone(), q))
                .collect(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads and validates `quests.txt`.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let blocks = read_blocks(path)?;
        let quests = blocks
            .iter()
            .map(Quest::from_block)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_quests(quests)
    }

    pub fn get(&self, quest_id: &str) -> Option<&Quest> {
        self.quests.get(quest_id)
    }

    pub fn contains(&self, quest_id: &str) -> bool {
        self.quests.contains_key(quest_id)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Quests in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.values()
    }

    /// Quests whose required level falls in `min..=max`.
    pub fn quests_in_level_range(&self, min: u32, max: u32) -> Vec<&Quest> {
        self.quests
            .values()
            .filter(|q| (min..=max).contains(&q.required_level))
            .collect()
    }

    /// Checks that every prerequisite resolves and that no prerequisite chain
    /// loops. Each quest has at most one prerequisite, so a chain walk with a
    /// visited set is enough to catch cycles.
    fn validate(&self) -> Result<(), DataError> {
        for quest in self.quests.values() {
            if let Some(prereq) = &quest.prerequisite {
                if !self.quests.contains_key(prereq) {
                    return Err(DataError::UnknownPrerequisite {
                        quest: quest.quest_id.clone(),
                        prerequisite: prereq.clone(),
                    });
                }
            }
        }

        for quest in self.quests.values() {
            let mut seen = BTreeSet::new();
            let mut current = Some(quest.quest_id.as_str());
            while let Some(id) = current {
                if !seen.insert(id) {
                    return Err(DataError::PrerequisiteCycle(id.to_string()));
                }
                current = self.quests.get(id).and_then(|q| q.prerequisite.as_deref());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn quest(id: &str, level: u32, prereq: Option<&str>) -> Quest {
        Quest {
            quest_id: id.to_string(),
            title: format!("Quest {}", id),
            description: String::new(),
            reward_xp: 10,
            reward_gold: 5,
            required_level: level,
            prerequisite: prereq.map(str::to_string),
        }
    }

    #[test]
    fn test_quest_from_block_with_prerequisite() {
        let blocks = crate::data::parse_blocks(
            "QUEST_ID: q2\nTITLE: Two\nDESCRIPTION: Second.\nREWARD_XP: 100\nREWARD_GOLD: 50\nREQUIRED_LEVEL: 2\nPREREQUISITE: q1\n",
        )
        .unwrap();
        let q = Quest::from_block(&blocks[0]).unwrap();
        assert_eq!(q.quest_id, "q2");
        assert_eq!(q.reward_xp, 100);
        assert_eq!(q.required_level, 2);
        assert_eq!(q.prerequisite.as_deref(), Some("q1"));
    }

    #[test]
    fn test_quest_from_block_none_sentinel() {
        let blocks = crate::data::parse_blocks(
            "QUEST_ID: q1\nTITLE: One\nDESCRIPTION: First.\nREWARD_XP: 50\nREWARD_GOLD: 25\nREQUIRED_LEVEL: 1\nPREREQUISITE: NONE\n",
        )
        .unwrap();
        let q = Quest::from_block(&blocks[0]).unwrap();
        assert!(q.prerequisite.is_none());
    }

    #[test]
    fn test_quest_from_block_missing_field() {
        let blocks = crate::data::parse_blocks("QUEST_ID: q1\nTITLE: One\n").unwrap();
        assert!(matches!(
            Quest::from_block(&blocks[0]),
            Err(DataError::MissingField(_))
        ));
    }

    #[test]
    fn test_catalog_accepts_valid_chain() {
        let catalog = QuestCatalog::from_quests([
            quest("a", 1, None),
            quest("b", 2, Some("a")),
            quest("c", 3, Some("b")),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("b"));
    }

    #[test]
    fn test_catalog_rejects_unknown_prerequisite() {
        let result = QuestCatalog::from_quests([quest("a", 1, Some("ghost"))]);
        assert!(matches!(
            result,
            Err(DataError::UnknownPrerequisite { .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_self_prerequisite() {
        let result = QuestCatalog::from_quests([quest("a", 1, Some("a"))]);
        assert!(matches!(result, Err(DataError::PrerequisiteCycle(_))));
    }

    #[test]
    fn test_catalog_rejects_two_quest_cycle() {
        let result =
            QuestCatalog::from_quests([quest("a", 1, Some("b")), quest("b", 1, Some("a"))]);
        assert!(matches!(result, Err(DataError::PrerequisiteCycle(_))));
    }

    #[test]
    fn test_quests_in_level_range() {
        let catalog = QuestCatalog::from_quests([
            quest("a", 1, None),
            quest("b", 3, None),
            quest("c", 6, None),
        ])
        .unwrap();
        let mid = catalog.quests_in_level_range(2, 5);
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].quest_id, "b");
    }
}
