//! Game State
//!
//! The single mutable record of what the player has done: inventory, maps
//! visited, quests completed. Replaced wholesale on new game or load.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inventory::{Inventory, InventoryItem};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    /// Items picked up from the world or produced by minigames
    pub items_collected: u32,
    pub visited_maps: BTreeSet<String>,
    /// Quest ids in completion order
    pub completed_quests: Vec<u32>,
    pub inventory: Inventory,
    /// Names of collected items still held, mirrored on submission
    pub collected_items: Vec<String>,
    /// Every item name the player has ever held (quest prerequisites)
    pub obtained_items: BTreeSet<String>,
    /// Map placement ids that were picked up and must not respawn
    pub picked_up: BTreeSet<String>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item found in the world (or printed, dispensed...)
    pub fn collect_item(&mut self, placement_id: Option<&str>, item: InventoryItem) {
        debug!("Collected {}", item.name);
        if let Some(id) = placement_id {
            self.picked_up.insert(id.to_string());
        }
        self.items_collected += 1;
        self.collected_items.push(item.name.clone());
        self.obtained_items.insert(item.name.clone());
        self.inventory.add(item);
    }

    /// Add a quest reward. Rewards don't count towards `items_collected`.
    pub fn receive_reward(&mut self, item: InventoryItem) {
        debug!("Received reward {}", item.name);
        self.obtained_items.insert(item.name.clone());
        self.inventory.add(item);
    }

    /// Take the first item with this name out of the inventory and the collected list
    pub fn remove_item(&mut self, name: &str) -> Option<InventoryItem> {
        let removed = self.inventory.remove_first(name)?;
        if let Some(index) = self.collected_items.iter().position(|n| n == name) {
            self.collected_items.remove(index);
        }
        Some(removed)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.contains(name)
    }

    pub fn has_obtained(&self, name: &str) -> bool {
        self.obtained_items.contains(name)
    }

    pub fn is_picked_up(&self, placement_id: &str) -> bool {
        self.picked_up.contains(placement_id)
    }

    /// Mark a map visited. Returns true on the first visit.
    pub fn visit_map(&mut self, map_id: &str) -> bool {
        self.visited_maps.insert(map_id.to_string())
    }

    pub fn mark_quest_completed(&mut self, quest_id: u32) {
        if !self.completed_quests.contains(&quest_id) {
            self.completed_quests.push(quest_id);
        }
    }

    pub fn is_quest_completed(&self, quest_id: u32) -> bool {
        self.completed_quests.contains(&quest_id)
    }
}
