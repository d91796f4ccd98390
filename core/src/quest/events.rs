//! Quest Event Types
//!
//! Discrete events that move quests between phases.

use serde::{Deserialize, Serialize};

use super::state::QuestPhase;

/// Events that can change quest phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestEvent {
    /// Player gained an item (pickup, minigame, reward)
    ItemCollected {
        item: String,
    },

    /// An item left the inventory (consumed by a machine, handed over)
    ItemRemoved {
        item: String,
    },

    /// Player accepted a quest in dialogue
    QuestAccepted {
        quest_id: u32,
    },

    /// Player handed the required items to the quest giver
    ItemsSubmitted {
        quest_id: u32,
    },

    /// Player talked to an NPC
    NpcInteraction {
        npc_id: String,
    },
}

impl QuestEvent {
    /// Get event type as string (for logging/debugging)
    pub fn event_type(&self) -> &'static str {
        match self {
            QuestEvent::ItemCollected { .. } => "item_collected",
            QuestEvent::ItemRemoved { .. } => "item_removed",
            QuestEvent::QuestAccepted { .. } => "quest_accepted",
            QuestEvent::ItemsSubmitted { .. } => "items_submitted",
            QuestEvent::NpcInteraction { .. } => "npc_interaction",
        }
    }
}

/// Result of processing a quest event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestEventResult {
    /// Quest that was affected
    pub quest_id: u32,
    pub old_phase: QuestPhase,
    pub new_phase: QuestPhase,
    pub progress: u32,
    pub max_progress: u32,
}

impl QuestEventResult {
    /// The quest just became available from its giver
    pub fn unlocked(&self) -> bool {
        self.old_phase == QuestPhase::Locked && self.new_phase == QuestPhase::Available
    }

    /// All required items are now held
    pub fn became_ready(&self) -> bool {
        self.old_phase != QuestPhase::ReadyToSubmit && self.new_phase == QuestPhase::ReadyToSubmit
    }
}
