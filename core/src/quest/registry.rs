//! Quest Registry
//!
//! Loads and holds the quest table. Table order is the order the quest chain
//! is meant to be played in.

use std::collections::HashSet;
use tracing::{info, warn};

use super::definition::{Quest, RawQuestFile};
use crate::data::ItemRegistry;

const BUILTIN_QUESTS: &str = include_str!("../../data/quests.toml");

/// Registry for all quest definitions
#[derive(Debug, Clone, Default)]
pub struct QuestRegistry {
    quests: Vec<Quest>,
}

impl QuestRegistry {
    pub fn new() -> Self {
        Self { quests: Vec::new() }
    }

    /// Registry loaded from the quest table compiled into the crate
    pub fn builtin() -> Result<Self, String> {
        let mut registry = Self::new();
        registry.load_from_str(BUILTIN_QUESTS)
            .map_err(|e| format!("Failed to load built-in quests: {}", e))?;
        Ok(registry)
    }

    /// Parse a TOML quest table and append its quests
    pub fn load_from_str(&mut self, content: &str) -> Result<usize, String> {
        let raw: RawQuestFile = toml::from_str(content)
            .map_err(|e| format!("Failed to parse quest table: {}", e))?;

        let mut count = 0;
        for raw_quest in &raw.quests {
            let quest = Quest::from_raw(raw_quest)?;
            if self.get(quest.id).is_some() {
                return Err(format!("Duplicate quest id {}", quest.id));
            }
            info!("Loaded quest: {} ({})", quest.title, quest.id);
            self.quests.push(quest);
            count += 1;
        }

        info!("Loaded {} quest definitions", count);
        Ok(count)
    }

    /// Warn about quests referencing items or NPCs that don't exist.
    /// Returns the number of problems found.
    pub fn validate(&self, items: &ItemRegistry, npc_ids: &HashSet<&str>) -> usize {
        let mut problems = 0;

        for quest in &self.quests {
            if !npc_ids.contains(quest.quest_giver.as_str()) {
                warn!("Quest {} is given by unknown NPC '{}'", quest.id, quest.quest_giver);
                problems += 1;
            }

            let referenced = quest.required_items.iter()
                .chain(quest.prerequisites.iter())
                .chain(std::iter::once(&quest.reward_item));
            for item in referenced {
                if !items.contains(item) {
                    warn!("Quest {} references unknown item '{}'", quest.id, item);
                    problems += 1;
                }
            }
        }

        problems
    }

    /// Get a quest by ID
    pub fn get(&self, quest_id: u32) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == quest_id)
    }

    /// Position of a quest in the table
    pub fn index_of(&self, quest_id: u32) -> Option<usize> {
        self.quests.iter().position(|q| q.id == quest_id)
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Quest> {
        self.quests.get(index)
    }

    /// All quests in table order
    pub fn all(&self) -> &[Quest] {
        &self.quests
    }

    /// Quests handed out by a specific NPC, in table order
    pub fn quests_for_npc<'a, 'b>(&'a self, npc_id: &'b str) -> impl Iterator<Item = &'a Quest> + use<'a, 'b> {
        self.quests.iter().filter(move |q| q.is_given_by(npc_id))
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_quests_load_in_order() {
        let registry = QuestRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 9);
        let ids: Vec<u32> = registry.all().iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
        assert_eq!(registry.get(1).unwrap().quest_giver, "receptionist");
        assert_eq!(registry.index_of(9), Some(8));
    }

    #[test]
    fn test_builtin_quests_reference_known_items() {
        let registry = QuestRegistry::builtin().unwrap();
        let items = ItemRegistry::builtin().unwrap();
        let npcs: HashSet<&str> = registry.all().iter().map(|q| q.quest_giver.as_str()).collect();
        assert_eq!(registry.validate(&items, &npcs), 0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let table = r#"
            [[quest]]
            id = 1
            title = "A"
            quest_giver = "npc"
            required_item = "coin"
            reward_item = "cake"

            [[quest]]
            id = 1
            title = "B"
            quest_giver = "npc"
            required_item = "coin"
            reward_item = "cake"
        "#;
        let mut registry = QuestRegistry::new();
        assert!(registry.load_from_str(table).is_err());
    }

    #[test]
    fn test_quests_for_npc() {
        let registry = QuestRegistry::builtin().unwrap();
        let ids: Vec<u32> = registry.quests_for_npc("it_admin").map(|q| q.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
