//! Quest Manager
//!
//! Owns the quest table and the player's quest log. Validates submissions,
//! moves items between the inventory and quest rewards, and keeps each
//! quest's stored phase in step with the game state.

use thiserror::Error;
use tracing::{debug, info};

use super::definition::Quest;
use super::events::QuestEventResult;
use super::registry::QuestRegistry;
use super::state::{QuestLog, QuestPhase, QuestProgress};
use crate::data::ItemRegistry;
use crate::inventory::Inventory;
use crate::state::GameState;

/// Why items could not be handed in (or a quest accepted).
/// The `Display` text is shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestError {
    #[error("There is no quest with id {0}")]
    UnknownQuest(u32),
    #[error("I don't have anything for you right now.")]
    NoQuestFromNpc,
    #[error("You already finished that quest.")]
    AlreadyCompleted,
    #[error("This quest isn't available yet.")]
    Locked,
    #[error("You are already working on this quest.")]
    AlreadyStarted,
    #[error("You still need: {}", .missing.join(", "))]
    MissingItems { missing: Vec<String> },
}

/// Submission failures are reported to the player, never fatal
pub type SubmitRejection = QuestError;

/// What a successful hand-in did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub quest_id: u32,
    /// Items taken from the inventory
    pub removed: Vec<String>,
    pub reward: String,
    /// The current quest pointer moved on
    pub advanced: bool,
}

pub struct QuestManager {
    registry: QuestRegistry,
    log: QuestLog,
}

impl QuestManager {
    pub fn new(registry: QuestRegistry) -> Self {
        let log = Self::fresh_log(&registry);
        Self { registry, log }
    }

    fn fresh_log(registry: &QuestRegistry) -> QuestLog {
        QuestLog {
            quests: registry.all().iter().map(QuestProgress::new).collect(),
            current_quest: 0,
        }
    }

    /// Forget all progress (new game)
    pub fn reset(&mut self) {
        self.log = Self::fresh_log(&self.registry);
    }

    pub fn registry(&self) -> &QuestRegistry {
        &self.registry
    }

    pub fn log(&self) -> &QuestLog {
        &self.log
    }

    pub fn progress(&self, quest_id: u32) -> Option<&QuestProgress> {
        self.log.get(quest_id)
    }

    pub fn phase(&self, quest_id: u32) -> QuestPhase {
        self.log.phase(quest_id)
    }

    /// First non-completed quest given by this NPC, in table order
    pub fn get_quest_by_npc(&self, npc_id: &str) -> Option<&Quest> {
        self.registry
            .quests_for_npc(npc_id)
            .find(|q| !self.log.is_completed(q.id))
    }

    pub fn get_quest_by_id(&self, quest_id: u32) -> Option<&Quest> {
        self.registry.get(quest_id)
    }

    /// First non-completed quest whose items are found at `target`
    pub fn get_quest_by_target(&self, target: &str) -> Option<&Quest> {
        self.registry
            .all()
            .iter()
            .find(|q| q.target == target && !self.log.is_completed(q.id))
    }

    /// Check whether the NPC would accept a hand-in right now
    pub fn can_submit_items(&self, npc_id: &str, inventory: &Inventory) -> Result<u32, SubmitRejection> {
        let quest = match self.get_quest_by_npc(npc_id) {
            Some(q) => q,
            None => {
                if self.registry.quests_for_npc(npc_id).next().is_some() {
                    return Err(QuestError::AlreadyCompleted);
                }
                return Err(QuestError::NoQuestFromNpc);
            }
        };

        if self.log.is_completed(quest.id) {
            return Err(QuestError::AlreadyCompleted);
        }

        let missing = inventory.missing(&quest.required_items);
        if !missing.is_empty() {
            return Err(QuestError::MissingItems {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }

        Ok(quest.id)
    }

    /// Hand the required items to the NPC and receive the reward.
    /// A quest that was never accepted is accepted and completed in one go.
    pub fn submit_items(
        &mut self,
        npc_id: &str,
        state: &mut GameState,
        items: &ItemRegistry,
    ) -> Result<SubmitOutcome, SubmitRejection> {
        let quest_id = self.can_submit_items(npc_id, &state.inventory)?;
        let quest = self.registry.get(quest_id)
            .ok_or(QuestError::UnknownQuest(quest_id))?
            .clone();

        let mut removed = Vec::with_capacity(quest.required_items.len());
        for name in &quest.required_items {
            if state.remove_item(name).is_some() {
                removed.push(name.clone());
            }
        }

        state.receive_reward(items.make_inventory_item(&quest.reward_item));
        state.mark_quest_completed(quest_id);

        if let Some(progress) = self.log.get_mut(quest_id) {
            progress.complete();
        }

        let advanced = self.advance_current_quest(quest_id);
        info!("Quest {} '{}' completed, reward {}", quest_id, quest.title, quest.reward_item);

        Ok(SubmitOutcome {
            quest_id,
            removed,
            reward: quest.reward_item,
            advanced,
        })
    }

    /// Move the pointer past completed quests if `completed_id` was the active one
    fn advance_current_quest(&mut self, completed_id: u32) -> bool {
        let Some(index) = self.registry.index_of(completed_id) else {
            return false;
        };
        if index != self.log.current_quest {
            return false;
        }

        let last = self.registry.len().saturating_sub(1);
        let mut next = self.log.current_quest;
        while next < last {
            next += 1;
            let id = self.log.quests.get(next).map(|p| p.quest_id);
            if !id.map(|id| self.log.is_completed(id)).unwrap_or(false) {
                break;
            }
        }

        let moved = next > self.log.current_quest;
        self.log.current_quest = next;
        if moved {
            debug!("Current quest pointer moved to {}", next);
        }
        moved
    }

    /// Add progress to a quest, clamped to its maximum.
    /// Returns whether it reached the maximum, `None` for unknown quests.
    pub fn update_quest_progress(&mut self, quest_id: u32, amount: u32) -> Option<bool> {
        self.log.get_mut(quest_id).map(|p| p.add_progress(amount))
    }

    /// The quest at the current pointer
    pub fn current_quest(&self) -> Option<&Quest> {
        self.registry.get_by_index(self.log.current_quest)
    }

    pub fn current_quest_index(&self) -> usize {
        self.log.current_quest
    }

    /// Accept an available quest
    pub fn accept_quest(&mut self, quest_id: u32, state: &GameState) -> Result<QuestEventResult, QuestError> {
        let quest = self.registry.get(quest_id).ok_or(QuestError::UnknownQuest(quest_id))?;
        let progress = self.log.get_mut(quest_id).ok_or(QuestError::UnknownQuest(quest_id))?;

        match progress.phase {
            QuestPhase::Locked => return Err(QuestError::Locked),
            QuestPhase::Completed => return Err(QuestError::AlreadyCompleted),
            QuestPhase::Collecting | QuestPhase::ReadyToSubmit => return Err(QuestError::AlreadyStarted),
            QuestPhase::Available => {}
        }

        let old_phase = progress.phase;
        progress.phase = QuestPhase::Collecting;
        Self::sync_collecting(quest, progress, &state.inventory);
        info!("Accepted quest {} '{}'", quest.id, quest.title);

        Ok(QuestEventResult {
            quest_id,
            old_phase,
            new_phase: progress.phase,
            progress: progress.progress,
            max_progress: progress.max_progress,
        })
    }

    /// Recompute phases after the game state changed. Returns the quests whose phase moved.
    pub fn refresh_phases(&mut self, state: &GameState) -> Vec<QuestEventResult> {
        let mut results = Vec::new();

        for quest in self.registry.all() {
            let Some(progress) = self.log.get_mut(quest.id) else {
                continue;
            };
            let old_phase = progress.phase;
            let old_progress = progress.progress;

            match progress.phase {
                QuestPhase::Locked => {
                    if quest.prerequisites.iter().all(|item| state.has_obtained(item)) {
                        progress.phase = QuestPhase::Available;
                    }
                }
                QuestPhase::Collecting | QuestPhase::ReadyToSubmit => {
                    Self::sync_collecting(quest, progress, &state.inventory);
                }
                QuestPhase::Available | QuestPhase::Completed => {}
            }

            if progress.phase != old_phase || progress.progress != old_progress {
                debug!(
                    "Quest {} phase {} -> {} ({}/{})",
                    quest.id,
                    old_phase.as_str(),
                    progress.phase.as_str(),
                    progress.progress,
                    progress.max_progress
                );
                results.push(QuestEventResult {
                    quest_id: quest.id,
                    old_phase,
                    new_phase: progress.phase,
                    progress: progress.progress,
                    max_progress: progress.max_progress,
                });
            }
        }

        results
    }

    /// Progress counts required items held; the phase follows whether all are held
    fn sync_collecting(quest: &Quest, progress: &mut QuestProgress, inventory: &Inventory) {
        let missing = inventory.missing(&quest.required_items).len();
        let held = quest.required_items.len().saturating_sub(missing) as u32;
        progress.set_progress(held);
        progress.phase = if missing == 0 {
            QuestPhase::ReadyToSubmit
        } else {
            QuestPhase::Collecting
        };
    }

    /// Replace the log with one loaded from a save, reconciled against the table.
    /// Unknown quest ids are dropped, missing ones start fresh.
    pub fn restore(&mut self, loaded: QuestLog, state: &GameState) {
        let mut log = Self::fresh_log(&self.registry);

        for progress in log.quests.iter_mut() {
            let saved = loaded.get(progress.quest_id);
            let completed = saved.map(|s| s.completed).unwrap_or(false)
                || state.is_quest_completed(progress.quest_id);
            if completed {
                progress.complete();
            } else if let Some(saved) = saved {
                progress.phase = match saved.phase {
                    QuestPhase::Completed => QuestPhase::Collecting,
                    phase => phase,
                };
                progress.set_progress(saved.progress);
            }
        }

        log.current_quest = loaded.current_quest.min(self.registry.len().saturating_sub(1));
        self.log = log;
        self.refresh_phases(state);
        info!(
            "Restored quest log: {}/{} completed",
            self.log.completed_count(),
            self.registry.len()
        );
    }

    pub fn all_completed(&self) -> bool {
        !self.registry.is_empty() && self.log.completed_count() == self.registry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (QuestManager, GameState, ItemRegistry) {
        let manager = QuestManager::new(QuestRegistry::builtin().unwrap());
        (manager, GameState::new(), ItemRegistry::builtin().unwrap())
    }

    fn give(state: &mut GameState, items: &ItemRegistry, name: &str) {
        state.collect_item(None, items.make_inventory_item(name));
    }

    #[test]
    fn test_initial_phases() {
        let (manager, _, _) = setup();
        assert_eq!(manager.phase(1), QuestPhase::Available);
        assert_eq!(manager.phase(2), QuestPhase::Locked);
        assert_eq!(manager.current_quest().unwrap().id, 1);
    }

    #[test]
    fn test_get_quest_by_npc_skips_completed() {
        let (mut manager, mut state, items) = setup();
        state.obtained_items.insert("office_keycard".to_string());
        manager.refresh_phases(&state);
        manager.accept_quest(2, &state).unwrap();
        give(&mut state, &items, "energy_drink");
        manager.refresh_phases(&state);
        manager.submit_items("it_admin", &mut state, &items).unwrap();

        assert_eq!(manager.get_quest_by_npc("it_admin").unwrap().id, 4);
        assert!(manager.get_quest_by_npc("nobody").is_none());
        assert_eq!(manager.get_quest_by_target("printer").unwrap().id, 3);
    }

    #[test]
    fn test_submit_checks_items() {
        let (mut manager, mut state, items) = setup();

        let err = manager.can_submit_items("receptionist", &state.inventory).unwrap_err();
        assert_eq!(err.to_string(), "You still need: visitor_badge");

        manager.accept_quest(1, &state).unwrap();
        assert!(manager.can_submit_items("receptionist", &state.inventory).is_err());

        give(&mut state, &items, "visitor_badge");
        assert_eq!(manager.can_submit_items("receptionist", &state.inventory), Ok(1));
        assert_eq!(
            manager.can_submit_items("ghost", &state.inventory),
            Err(QuestError::NoQuestFromNpc)
        );
    }

    #[test]
    fn test_submit_without_accepting_first() {
        let (mut manager, mut state, items) = setup();
        give(&mut state, &items, "visitor_badge");
        assert_eq!(manager.phase(1), QuestPhase::Available);

        assert_eq!(manager.can_submit_items("receptionist", &state.inventory), Ok(1));
        let outcome = manager.submit_items("receptionist", &mut state, &items).unwrap();
        assert_eq!(outcome.quest_id, 1);
        assert_eq!(manager.phase(1), QuestPhase::Completed);
        assert!(state.has_item("office_keycard"));
        assert!(!state.has_item("visitor_badge"));
    }

    #[test]
    fn test_quest_lookup_outlives_npc_id() {
        let (manager, _, _) = setup();
        let quest = {
            let npc_id = String::from("receptionist");
            manager.get_quest_by_npc(&npc_id)
        };
        assert_eq!(quest.map(|q| q.id), Some(1));
    }

    #[test]
    fn test_submit_transfers_items_and_advances() {
        let (mut manager, mut state, items) = setup();
        manager.accept_quest(1, &state).unwrap();
        give(&mut state, &items, "visitor_badge");

        let outcome = manager.submit_items("receptionist", &mut state, &items).unwrap();
        assert_eq!(outcome.removed, vec!["visitor_badge"]);
        assert_eq!(outcome.reward, "office_keycard");
        assert!(outcome.advanced);

        assert!(!state.has_item("visitor_badge"));
        assert!(state.collected_items.is_empty());
        assert!(state.has_item("office_keycard"));
        assert_eq!(state.completed_quests, vec![1]);

        let progress = manager.progress(1).unwrap();
        assert!(progress.completed && progress.item_submitted);
        assert_eq!(progress.progress, progress.max_progress);
        assert_eq!(manager.current_quest_index(), 1);
    }

    #[test]
    fn test_submitting_completed_quest_fails() {
        let (mut manager, mut state, items) = setup();
        manager.accept_quest(1, &state).unwrap();
        give(&mut state, &items, "visitor_badge");
        manager.submit_items("receptionist", &mut state, &items).unwrap();

        // A second badge doesn't allow a second hand-in
        give(&mut state, &items, "visitor_badge");
        assert_eq!(
            manager.submit_items("receptionist", &mut state, &items),
            Err(QuestError::AlreadyCompleted)
        );
        assert!(state.has_item("visitor_badge"));
    }

    #[test]
    fn test_out_of_order_completion_keeps_pointer() {
        let (mut manager, mut state, items) = setup();
        give(&mut state, &items, "office_keycard");
        manager.refresh_phases(&state);

        manager.accept_quest(5, &state).unwrap();
        give(&mut state, &items, "old_photo");
        give(&mut state, &items, "photo_frame");
        let outcome = manager.submit_items("designer", &mut state, &items).unwrap();
        assert!(!outcome.advanced);
        assert_eq!(manager.current_quest_index(), 0);

        manager.accept_quest(1, &state).unwrap();
        give(&mut state, &items, "visitor_badge");
        manager.submit_items("receptionist", &mut state, &items).unwrap();
        assert_eq!(manager.current_quest_index(), 1);
    }

    #[test]
    fn test_pointer_never_exceeds_last_index() {
        let (mut manager, mut state, items) = setup();
        let last = manager.registry().len() - 1;
        let quests: Vec<Quest> = manager.registry().all().to_vec();

        for quest in &quests {
            for prereq in &quest.prerequisites {
                state.obtained_items.insert(prereq.clone());
            }
            manager.refresh_phases(&state);
            manager.accept_quest(quest.id, &state).unwrap();
            for item in &quest.required_items {
                give(&mut state, &items, item);
            }
            manager.submit_items(&quest.quest_giver, &mut state, &items).unwrap();
            let before = manager.current_quest_index();
            assert!(before <= last);
        }

        assert_eq!(manager.current_quest_index(), last);
        assert!(manager.all_completed());
    }

    #[test]
    fn test_progress_is_clamped() {
        let (mut manager, _, _) = setup();
        for quest_id in 1..=9 {
            for amount in [0, 1, 2, 7, 100] {
                manager.update_quest_progress(quest_id, amount);
            }
            let progress = manager.progress(quest_id).unwrap();
            assert!(progress.progress <= progress.max_progress);
        }
        assert_eq!(manager.update_quest_progress(42, 1), None);
    }

    #[test]
    fn test_phase_machine_follows_inventory() {
        let (mut manager, mut state, items) = setup();
        give(&mut state, &items, "office_keycard");
        let unlocked = manager.refresh_phases(&state);
        assert!(unlocked.iter().any(|r| r.quest_id == 5 && r.unlocked()));

        manager.accept_quest(5, &state).unwrap();
        assert_eq!(manager.phase(5), QuestPhase::Collecting);

        give(&mut state, &items, "old_photo");
        manager.refresh_phases(&state);
        assert_eq!(manager.progress(5).unwrap().progress, 1);

        give(&mut state, &items, "photo_frame");
        let results = manager.refresh_phases(&state);
        assert!(results.iter().any(|r| r.quest_id == 5 && r.became_ready()));

        state.remove_item("photo_frame");
        manager.refresh_phases(&state);
        assert_eq!(manager.phase(5), QuestPhase::Collecting);
    }

    #[test]
    fn test_accept_rules() {
        let (mut manager, state, _) = setup();
        assert_eq!(manager.accept_quest(2, &state), Err(QuestError::Locked));
        assert_eq!(manager.accept_quest(77, &state), Err(QuestError::UnknownQuest(77)));
        manager.accept_quest(1, &state).unwrap();
        assert_eq!(manager.accept_quest(1, &state), Err(QuestError::AlreadyStarted));
    }

    #[test]
    fn test_restore_reconciles_with_table() {
        let (mut manager, mut state, items) = setup();
        state.mark_quest_completed(1);
        give(&mut state, &items, "office_keycard");

        let loaded = QuestLog {
            quests: vec![
                QuestProgress {
                    quest_id: 2,
                    phase: QuestPhase::Collecting,
                    progress: 50,
                    max_progress: 50,
                    completed: false,
                    item_submitted: false,
                },
                QuestProgress {
                    quest_id: 99,
                    phase: QuestPhase::Completed,
                    progress: 1,
                    max_progress: 1,
                    completed: true,
                    item_submitted: true,
                },
            ],
            current_quest: 40,
        };

        manager.restore(loaded, &state);
        assert!(manager.progress(1).unwrap().completed);
        assert_eq!(manager.phase(2), QuestPhase::Collecting);
        assert_eq!(manager.progress(2).unwrap().progress, 0);
        assert!(manager.progress(99).is_none());
        assert_eq!(manager.current_quest_index(), 8);
        assert_eq!(manager.phase(5), QuestPhase::Available);
    }
}
