//! Quest State Tracking
//!
//! Per-quest progress records and the explicit phase each quest is in.

use serde::{Deserialize, Serialize};

use super::definition::Quest;

/// Lifecycle of a quest. Moves forward on discrete events, see `QuestManager::refresh_phases`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestPhase {
    /// Prerequisites not obtained yet
    #[default]
    Locked,
    /// Quest giver will offer it
    Available,
    /// Accepted, some required items still missing
    Collecting,
    /// Accepted and every required item is held
    ReadyToSubmit,
    Completed,
}

impl QuestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestPhase::Locked => "locked",
            QuestPhase::Available => "available",
            QuestPhase::Collecting => "collecting",
            QuestPhase::ReadyToSubmit => "ready_to_submit",
            QuestPhase::Completed => "completed",
        }
    }

    /// The player has accepted the quest
    pub fn is_started(&self) -> bool {
        matches!(self, QuestPhase::Collecting | QuestPhase::ReadyToSubmit | QuestPhase::Completed)
    }
}

/// Progress on a single quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestProgress {
    pub quest_id: u32,
    #[serde(default)]
    pub phase: QuestPhase,
    #[serde(default)]
    pub progress: u32,
    #[serde(default = "default_max_progress")]
    pub max_progress: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub item_submitted: bool,
}

fn default_max_progress() -> u32 {
    1
}

impl QuestProgress {
    pub fn new(quest: &Quest) -> Self {
        let phase = if quest.prerequisites.is_empty() {
            QuestPhase::Available
        } else {
            QuestPhase::Locked
        };
        Self {
            quest_id: quest.id,
            phase,
            progress: 0,
            max_progress: quest.max_progress,
            completed: false,
            item_submitted: false,
        }
    }

    /// Add progress, clamped to `max_progress`. Returns true if it reached the maximum.
    pub fn add_progress(&mut self, amount: u32) -> bool {
        if self.completed {
            return false;
        }
        let before = self.progress;
        self.progress = self.progress.saturating_add(amount).min(self.max_progress);
        before < self.max_progress && self.progress == self.max_progress
    }

    /// Set progress directly, clamped to `max_progress`
    pub fn set_progress(&mut self, amount: u32) {
        self.progress = amount.min(self.max_progress);
    }

    /// Mark the quest as handed in
    pub fn complete(&mut self) {
        self.phase = QuestPhase::Completed;
        self.progress = self.max_progress;
        self.completed = true;
        self.item_submitted = true;
    }

    pub fn progress_percent(&self) -> f32 {
        if self.max_progress == 0 {
            return 1.0;
        }
        self.progress as f32 / self.max_progress as f32
    }
}

/// All quest progress for the player, in quest table order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestLog {
    pub quests: Vec<QuestProgress>,
    /// Index into the quest table of the quest the player should focus on
    pub current_quest: usize,
}

impl QuestLog {
    pub fn get(&self, quest_id: u32) -> Option<&QuestProgress> {
        self.quests.iter().find(|p| p.quest_id == quest_id)
    }

    pub fn get_mut(&mut self, quest_id: u32) -> Option<&mut QuestProgress> {
        self.quests.iter_mut().find(|p| p.quest_id == quest_id)
    }

    pub fn phase(&self, quest_id: u32) -> QuestPhase {
        self.get(quest_id).map(|p| p.phase).unwrap_or_default()
    }

    pub fn is_completed(&self, quest_id: u32) -> bool {
        self.get(quest_id).map(|p| p.completed).unwrap_or(false)
    }

    pub fn completed_count(&self) -> usize {
        self.quests.iter().filter(|p| p.completed).count()
    }
}
