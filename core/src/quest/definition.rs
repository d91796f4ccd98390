//! Quest Definition Structures
//!
//! These structures are deserialized from the TOML quest table.

use serde::{Deserialize, Serialize};

/// The quest table as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestFile {
    #[serde(rename = "quest", default)]
    pub quests: Vec<RawQuest>,
}

/// Raw quest data as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuest {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Symbolic key of where the quest items are found (map, object or NPC id)
    #[serde(default)]
    pub target: String,
    pub quest_giver: String,
    /// Single required item (older table style)
    pub required_item: Option<String>,
    #[serde(default)]
    pub required_items: Vec<String>,
    pub reward_item: String,
    /// Defaults to the number of required items
    pub max_progress: Option<u32>,
    /// Item names the player must have obtained before the quest is offered
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub dialogue: Option<RawQuestDialogue>,
}

/// Dialogue lines spoken by the quest giver
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestDialogue {
    pub offer: Option<String>,
    pub progress: Option<String>,
    pub complete: Option<String>,
}

// ============================================================================
// Resolved Quest Structures (after parsing)
// ============================================================================

/// Simple dialogue strings
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestDialogue {
    /// Dialogue when offering the quest
    pub offer: Option<String>,
    /// Dialogue while the player is still collecting
    pub progress: Option<String>,
    /// Dialogue when the items are handed over
    pub complete: Option<String>,
}

impl QuestDialogue {
    pub fn from_raw(raw: &RawQuestDialogue) -> Self {
        Self {
            offer: raw.offer.clone(),
            progress: raw.progress.clone(),
            complete: raw.complete.clone(),
        }
    }
}

/// A fully resolved quest definition
#[derive(Debug, Clone)]
pub struct Quest {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub target: String,
    /// NPC id that gives and receives this quest
    pub quest_giver: String,
    pub required_items: Vec<String>,
    pub reward_item: String,
    pub max_progress: u32,
    pub prerequisites: Vec<String>,
    pub dialogue: QuestDialogue,
}

impl Quest {
    /// Create a Quest from raw TOML data
    pub fn from_raw(raw: &RawQuest) -> Result<Self, String> {
        let mut required_items = raw.required_items.clone();
        if let Some(ref single) = raw.required_item {
            if !required_items.contains(single) {
                required_items.insert(0, single.clone());
            }
        }

        if required_items.is_empty() {
            return Err(format!("Quest {} ('{}') has no required items", raw.id, raw.title));
        }

        if raw.reward_item.is_empty() {
            return Err(format!("Quest {} ('{}') has no reward item", raw.id, raw.title));
        }

        let max_progress = raw.max_progress
            .unwrap_or(required_items.len() as u32)
            .max(1);

        Ok(Self {
            id: raw.id,
            title: raw.title.clone(),
            description: raw.description.clone(),
            target: raw.target.clone(),
            quest_giver: raw.quest_giver.clone(),
            required_items,
            reward_item: raw.reward_item.clone(),
            max_progress,
            prerequisites: raw.prerequisites.clone(),
            dialogue: raw.dialogue.as_ref()
                .map(QuestDialogue::from_raw)
                .unwrap_or_default(),
        })
    }

    pub fn requires(&self, item: &str) -> bool {
        self.required_items.iter().any(|i| i == item)
    }

    pub fn is_given_by(&self, npc_id: &str) -> bool {
        self.quest_giver == npc_id
    }

    pub fn offer_text(&self) -> String {
        self.dialogue.offer.clone()
            .unwrap_or_else(|| format!("I need your help: {}", self.description))
    }

    pub fn progress_text(&self) -> String {
        self.dialogue.progress.clone()
            .unwrap_or_else(|| "Come back when you have everything.".to_string())
    }

    pub fn complete_text(&self) -> String {
        self.dialogue.complete.clone()
            .unwrap_or_else(|| "Thank you! Take this as a reward.".to_string())
    }
}
