//! Dialogue trees and the conversation currently on screen

use serde::Deserialize;

use crate::quest::{Quest, QuestPhase};

/// Node every tree starts from
pub const START_NODE: &str = "start";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueAction {
    AcceptQuest,
    SubmitItems,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DialogueChoice {
    pub text: String,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub action: Option<DialogueAction>,
}

impl DialogueChoice {
    pub fn action(text: &str, action: DialogueAction) -> Self {
        Self {
            text: text.to_string(),
            next: None,
            action: Some(action),
        }
    }

    pub fn goto(text: &str, next: &str) -> Self {
        Self {
            text: text.to_string(),
            next: Some(next.to_string()),
            action: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DialogueNode {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<DialogueChoice>,
}

impl DialogueNode {
    pub fn new(id: &str, text: &str, choices: Vec<DialogueChoice>) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            choices,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueTree {
    nodes: Vec<DialogueNode>,
}

impl DialogueTree {
    /// Build a tree, checking it has a start node and no dangling links
    pub fn new(nodes: Vec<DialogueNode>) -> Result<Self, String> {
        let tree = Self { nodes };
        if tree.get(START_NODE).is_none() {
            return Err(format!("dialogue has no '{}' node", START_NODE));
        }
        for node in &tree.nodes {
            for choice in &node.choices {
                if let Some(next) = &choice.next {
                    if tree.get(next).is_none() {
                        return Err(format!("node '{}' links to unknown node '{}'", node.id, next));
                    }
                }
            }
        }
        Ok(tree)
    }

    pub fn get(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// What picking a choice did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStep {
    /// Moved to another node
    Next,
    /// The game must carry out an action
    Action(DialogueAction),
    /// Conversation is over
    End,
}

/// A conversation in progress
#[derive(Debug, Clone)]
pub struct DialogueSession {
    pub npc_id: String,
    pub speaker: String,
    /// Quest this conversation is about, if any
    pub quest_id: Option<u32>,
    tree: DialogueTree,
    node: DialogueNode,
}

impl DialogueSession {
    /// Open a conversation. The opening depends on the phase of the NPC's quest;
    /// NPCs with nothing to hand out (or done) fall back to small talk.
    pub fn open(
        npc_id: &str,
        speaker: &str,
        tree: &DialogueTree,
        quest: Option<(&Quest, QuestPhase)>,
    ) -> Self {
        let small_talk = tree.get(START_NODE).cloned()
            .unwrap_or_else(|| DialogueNode::new(START_NODE, "...", Vec::new()));

        let (quest_id, node) = match quest {
            Some((quest, QuestPhase::Available)) => (
                Some(quest.id),
                DialogueNode::new("quest_offer", &quest.offer_text(), vec![
                    DialogueChoice::action("I'll help!", DialogueAction::AcceptQuest),
                    DialogueChoice::action("Not now.", DialogueAction::End),
                ]),
            ),
            Some((quest, QuestPhase::Collecting)) => (
                Some(quest.id),
                DialogueNode::new("quest_progress", &quest.progress_text(), vec![
                    DialogueChoice::action("I'll keep looking.", DialogueAction::End),
                ]),
            ),
            Some((quest, QuestPhase::ReadyToSubmit)) => (
                Some(quest.id),
                DialogueNode::new(
                    "quest_ready",
                    &format!("Oh! Do you have everything for \"{}\"?", quest.title),
                    vec![
                        DialogueChoice::action("Hand over the items", DialogueAction::SubmitItems),
                        DialogueChoice::action("Not yet.", DialogueAction::End),
                    ],
                ),
            ),
            _ => (None, small_talk),
        };

        Self {
            npc_id: npc_id.to_string(),
            speaker: speaker.to_string(),
            quest_id,
            tree: tree.clone(),
            node,
        }
    }

    pub fn text(&self) -> &str {
        &self.node.text
    }

    pub fn choices(&self) -> &[DialogueChoice] {
        &self.node.choices
    }

    pub fn node_id(&self) -> &str {
        &self.node.id
    }

    /// Pick a choice. Out-of-range indices are ignored (`None`).
    pub fn choose(&mut self, index: usize) -> Option<DialogueStep> {
        let choice = self.node.choices.get(index)?.clone();

        if let Some(action) = choice.action {
            return Some(match action {
                DialogueAction::End => DialogueStep::End,
                other => DialogueStep::Action(other),
            });
        }

        match choice.next.as_deref().and_then(|id| self.tree.get(id)) {
            Some(next) => {
                self.node = next.clone();
                Some(DialogueStep::Next)
            }
            None => Some(DialogueStep::End),
        }
    }

    /// Replace the current line with a closing remark the player can only dismiss
    pub fn say(&mut self, text: &str) {
        self.node = DialogueNode::new("reply", text, vec![
            DialogueChoice::action("OK", DialogueAction::End),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::QuestRegistry;

    fn tree() -> DialogueTree {
        DialogueTree::new(vec![
            DialogueNode::new("start", "Hello", vec![
                DialogueChoice::goto("More", "more"),
                DialogueChoice::action("Bye", DialogueAction::End),
            ]),
            DialogueNode::new("more", "Here's more", vec![
                DialogueChoice::action("Bye", DialogueAction::End),
            ]),
        ]).unwrap()
    }

    #[test]
    fn test_walk_small_talk() {
        let mut session = DialogueSession::open("bob", "Bob", &tree(), None);
        assert_eq!(session.text(), "Hello");
        assert_eq!(session.choose(5), None);
        assert_eq!(session.text(), "Hello");
        assert_eq!(session.choose(0), Some(DialogueStep::Next));
        assert_eq!(session.node_id(), "more");
        assert_eq!(session.choose(0), Some(DialogueStep::End));
    }

    #[test]
    fn test_quest_openings() {
        let quests = QuestRegistry::builtin().unwrap();
        let quest = quests.get(1).unwrap();

        let mut offer = DialogueSession::open("receptionist", "Rita", &tree(), Some((quest, QuestPhase::Available)));
        assert_eq!(offer.quest_id, Some(1));
        assert_eq!(offer.choose(0), Some(DialogueStep::Action(DialogueAction::AcceptQuest)));

        let mut ready = DialogueSession::open("receptionist", "Rita", &tree(), Some((quest, QuestPhase::ReadyToSubmit)));
        assert_eq!(ready.choose(0), Some(DialogueStep::Action(DialogueAction::SubmitItems)));
        ready.say("Thanks!");
        assert_eq!(ready.text(), "Thanks!");
        assert_eq!(ready.choose(0), Some(DialogueStep::End));

        let locked = DialogueSession::open("receptionist", "Rita", &tree(), Some((quest, QuestPhase::Locked)));
        assert_eq!(locked.quest_id, None);
        assert_eq!(locked.text(), "Hello");
    }

    #[test]
    fn test_tree_requires_start() {
        let nodes = vec![DialogueNode::new("middle", "Hm", Vec::new())];
        assert!(DialogueTree::new(nodes).is_err());
    }
}
