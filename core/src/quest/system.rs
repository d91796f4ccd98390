//! Quest System
//!
//! Facade over `QuestManager` used by the game loop and the renderer:
//! routes quest events, and answers the read-only questions the UI asks
//! (markers over NPCs, the quest guide).

use tracing::{debug, warn};

use super::definition::Quest;
use super::events::{QuestEvent, QuestEventResult};
use super::guide::GuideEntry;
use super::manager::{QuestError, QuestManager, SubmitOutcome, SubmitRejection};
use super::registry::QuestRegistry;
use super::state::{QuestLog, QuestPhase};
use crate::data::ItemRegistry;
use crate::inventory::Inventory;
use crate::state::GameState;

/// Marker drawn over a quest giver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestMarker {
    /// Has a quest to offer
    Available,
    /// Waiting for the player's items
    ReadyToSubmit,
}

impl QuestMarker {
    pub fn symbol(&self) -> &'static str {
        match self {
            QuestMarker::Available => "!",
            QuestMarker::ReadyToSubmit => "?",
        }
    }
}

pub struct QuestSystem {
    manager: QuestManager,
}

impl QuestSystem {
    pub fn new(registry: QuestRegistry) -> Self {
        Self {
            manager: QuestManager::new(registry),
        }
    }

    pub fn manager(&self) -> &QuestManager {
        &self.manager
    }

    pub fn reset(&mut self) {
        self.manager.reset();
    }

    pub fn get_quest_by_npc(&self, npc_id: &str) -> Option<&Quest> {
        self.manager.get_quest_by_npc(npc_id)
    }

    pub fn can_submit_items(&self, npc_id: &str, inventory: &Inventory) -> Result<u32, SubmitRejection> {
        self.manager.can_submit_items(npc_id, inventory)
    }

    pub fn submit_items(
        &mut self,
        npc_id: &str,
        state: &mut GameState,
        items: &ItemRegistry,
    ) -> Result<SubmitOutcome, SubmitRejection> {
        self.manager.submit_items(npc_id, state, items)
    }

    pub fn current_quest(&self) -> Option<&Quest> {
        self.manager.current_quest()
    }

    pub fn phase(&self, quest_id: u32) -> QuestPhase {
        self.manager.phase(quest_id)
    }

    pub fn log(&self) -> &QuestLog {
        self.manager.log()
    }

    pub fn all_completed(&self) -> bool {
        self.manager.all_completed()
    }

    /// Process a quest event and return the quests whose phase or progress moved
    pub fn handle_event(&mut self, event: &QuestEvent, state: &GameState) -> Vec<QuestEventResult> {
        debug!("Quest event: {}", event.event_type());

        let mut results = Vec::new();
        if let QuestEvent::QuestAccepted { quest_id } = event {
            match self.manager.accept_quest(*quest_id, state) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Could not accept quest {}: {}", quest_id, e),
            }
        }

        results.extend(self.manager.refresh_phases(state));
        results
    }

    /// Accept a quest offered in dialogue
    pub fn accept_quest(&mut self, quest_id: u32, state: &GameState) -> Result<QuestEventResult, QuestError> {
        self.manager.accept_quest(quest_id, state)
    }

    /// Marker to draw over an NPC, if any
    pub fn npc_marker(&self, npc_id: &str) -> Option<QuestMarker> {
        let quest = self.manager.get_quest_by_npc(npc_id)?;
        match self.manager.phase(quest.id) {
            QuestPhase::Available => Some(QuestMarker::Available),
            QuestPhase::ReadyToSubmit => Some(QuestMarker::ReadyToSubmit),
            _ => None,
        }
    }

    /// What to do next for the current quest
    pub fn guide(&self, state: &GameState) -> Option<GuideEntry> {
        if self.manager.all_completed() {
            return Some(GuideEntry::finished());
        }
        let quest = self.manager.current_quest()?;
        Some(GuideEntry::for_quest(quest, self.manager.phase(quest.id), state))
    }

    /// Guide entries for every started, unfinished quest (quest log screen)
    pub fn active_guides(&self, state: &GameState) -> Vec<GuideEntry> {
        self.manager.registry().all().iter()
            .filter(|q| {
                let phase = self.manager.phase(q.id);
                phase.is_started() && phase != QuestPhase::Completed
            })
            .map(|q| GuideEntry::for_quest(q, self.manager.phase(q.id), state))
            .collect()
    }

    /// Load a saved quest log
    pub fn restore(&mut self, log: QuestLog, state: &GameState) {
        self.manager.restore(log, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::GuideStep;

    fn setup() -> (QuestSystem, GameState, ItemRegistry) {
        (
            QuestSystem::new(QuestRegistry::builtin().unwrap()),
            GameState::new(),
            ItemRegistry::builtin().unwrap(),
        )
    }

    #[test]
    fn test_markers_follow_phase() {
        let (mut system, mut state, items) = setup();
        assert_eq!(system.npc_marker("receptionist"), Some(QuestMarker::Available));
        assert_eq!(system.npc_marker("it_admin"), None);

        system.handle_event(&QuestEvent::QuestAccepted { quest_id: 1 }, &state);
        assert_eq!(system.npc_marker("receptionist"), None);

        state.collect_item(Some("lobby_badge"), items.make_inventory_item("visitor_badge"));
        let results = system.handle_event(
            &QuestEvent::ItemCollected { item: "visitor_badge".to_string() },
            &state,
        );
        assert!(results.iter().any(|r| r.quest_id == 1 && r.became_ready()));
        assert_eq!(system.npc_marker("receptionist"), Some(QuestMarker::ReadyToSubmit));
        assert_eq!(QuestMarker::ReadyToSubmit.symbol(), "?");
    }

    #[test]
    fn test_submission_unlocks_follow_ups() {
        let (mut system, mut state, items) = setup();
        system.accept_quest(1, &state).unwrap();
        state.collect_item(None, items.make_inventory_item("visitor_badge"));
        system.submit_items("receptionist", &mut state, &items).unwrap();

        let results = system.handle_event(&QuestEvent::ItemsSubmitted { quest_id: 1 }, &state);
        let unlocked: Vec<u32> = results.iter().filter(|r| r.unlocked()).map(|r| r.quest_id).collect();
        assert_eq!(unlocked, vec![2, 5, 8]);
        assert_eq!(system.npc_marker("it_admin"), Some(QuestMarker::Available));
    }

    #[test]
    fn test_guide_steps() {
        let (mut system, mut state, items) = setup();
        assert_eq!(system.guide(&state).unwrap().step, GuideStep::Receive);

        system.accept_quest(1, &state).unwrap();
        let guide = system.guide(&state).unwrap();
        match &guide.step {
            GuideStep::Collect { held, needed, items: list } => {
                assert_eq!((*held, *needed), (0, 1));
                assert!(!list[0].held);
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(guide.instruction("Rita", &items), "Collect Visitor Badge (0/1)");

        state.collect_item(None, items.make_inventory_item("visitor_badge"));
        system.handle_event(&QuestEvent::ItemCollected { item: "visitor_badge".to_string() }, &state);
        assert_eq!(system.guide(&state).unwrap().step, GuideStep::Submit);
        assert_eq!(system.active_guides(&state).len(), 1);
    }

    #[test]
    fn test_failed_accept_is_not_fatal() {
        let (mut system, state, _) = setup();
        let results = system.handle_event(&QuestEvent::QuestAccepted { quest_id: 3 }, &state);
        assert!(results.is_empty());
        assert_eq!(system.phase(3), QuestPhase::Locked);
    }
}
