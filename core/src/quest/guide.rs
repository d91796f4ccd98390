//! Quest guide: what the player should do next for the current quest

use super::definition::Quest;
use super::state::QuestPhase;
use crate::data::ItemRegistry;
use crate::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideItem {
    pub name: String,
    pub held: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideStep {
    /// Some prerequisite items have never been obtained
    Locked { missing: Vec<String> },
    /// Talk to the quest giver to receive the quest
    Receive,
    /// Find the required items
    Collect { items: Vec<GuideItem>, held: u32, needed: u32 },
    /// Everything is held, hand it in
    Submit,
    /// Every quest is done
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideEntry {
    pub quest_id: u32,
    pub title: String,
    pub quest_giver: String,
    pub target: String,
    pub step: GuideStep,
}

impl GuideEntry {
    pub fn finished() -> Self {
        Self {
            quest_id: 0,
            title: "All quests complete".to_string(),
            quest_giver: String::new(),
            target: String::new(),
            step: GuideStep::Finished,
        }
    }

    pub(super) fn for_quest(quest: &Quest, phase: QuestPhase, state: &GameState) -> Self {
        let step = match phase {
            QuestPhase::Locked => GuideStep::Locked {
                missing: quest.prerequisites.iter()
                    .filter(|item| !state.has_obtained(item))
                    .cloned()
                    .collect(),
            },
            QuestPhase::Available => GuideStep::Receive,
            QuestPhase::Collecting => {
                let missing = state.inventory.missing(&quest.required_items);
                let mut pending = missing.clone();
                let items: Vec<GuideItem> = quest.required_items.iter()
                    .map(|name| {
                        let held = match pending.iter().position(|m| *m == name.as_str()) {
                            Some(i) => {
                                pending.remove(i);
                                false
                            }
                            None => true,
                        };
                        GuideItem { name: name.clone(), held }
                    })
                    .collect();
                let needed = quest.required_items.len() as u32;
                GuideStep::Collect {
                    held: needed - missing.len() as u32,
                    needed,
                    items,
                }
            }
            QuestPhase::ReadyToSubmit => GuideStep::Submit,
            QuestPhase::Completed => GuideStep::Finished,
        };

        Self {
            quest_id: quest.id,
            title: quest.title.clone(),
            quest_giver: quest.quest_giver.clone(),
            target: quest.target.clone(),
            step,
        }
    }

    /// One line of instructions for the HUD
    pub fn instruction(&self, giver_name: &str, items: &ItemRegistry) -> String {
        match &self.step {
            GuideStep::Locked { missing } => {
                let names: Vec<&str> = missing.iter().map(|m| items.display_name(m)).collect();
                format!("Find {} first", names.join(", "))
            }
            GuideStep::Receive => format!("Talk to {} to start '{}'", giver_name, self.title),
            GuideStep::Collect { items: list, held, needed } => {
                let next = list.iter()
                    .find(|i| !i.held)
                    .map(|i| items.display_name(&i.name))
                    .unwrap_or("the items");
                format!("Collect {} ({}/{})", next, held, needed)
            }
            GuideStep::Submit => format!("Bring the items to {}", giver_name),
            GuideStep::Finished => "You found the treasure!".to_string(),
        }
    }
}
