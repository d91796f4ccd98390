//! NPC Definitions
//!
//! Colleagues in the office. Each has a small-talk dialogue tree; quest
//! conversations are built on top of it from the quest table.

use std::collections::HashSet;
use serde::Deserialize;
use tracing::{info, warn};

use crate::dialogue::{DialogueNode, DialogueTree};

const BUILTIN_NPCS: &str = include_str!("../data/npcs.toml");

#[derive(Debug, Deserialize)]
struct RawNpcFile {
    #[serde(rename = "npc", default)]
    npcs: Vec<RawNpc>,
}

#[derive(Debug, Deserialize)]
struct RawNpc {
    id: String,
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default = "default_color")]
    color: [u8; 3],
    #[serde(default)]
    dialogue: Vec<DialogueNode>,
}

fn default_color() -> [u8; 3] {
    [200, 200, 200]
}

#[derive(Debug, Clone)]
pub struct NpcDefinition {
    pub id: String,
    pub name: String,
    pub title: String,
    /// Sprite tint, RGB
    pub color: [u8; 3],
    pub dialogue: DialogueTree,
}

impl NpcDefinition {
    fn from_raw(raw: RawNpc) -> Result<Self, String> {
        let dialogue = DialogueTree::new(raw.dialogue)
            .map_err(|e| format!("NPC '{}': {}", raw.id, e))?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            title: raw.title,
            color: raw.color,
            dialogue,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NpcRegistry {
    npcs: Vec<NpcDefinition>,
}

impl NpcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self, String> {
        let mut registry = Self::new();
        registry.load_from_str(BUILTIN_NPCS)
            .map_err(|e| format!("Failed to load built-in NPCs: {}", e))?;
        Ok(registry)
    }

    pub fn load_from_str(&mut self, content: &str) -> Result<(), String> {
        let raw: RawNpcFile = toml::from_str(content)
            .map_err(|e| format!("Failed to parse NPC table: {}", e))?;

        for raw_npc in raw.npcs {
            let npc = NpcDefinition::from_raw(raw_npc)?;
            if self.get(&npc.id).is_some() {
                warn!("Duplicate NPC ID '{}', ignoring", npc.id);
                continue;
            }
            self.npcs.push(npc);
        }

        info!("Loaded {} NPC definitions", self.npcs.len());
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&NpcDefinition> {
        self.npcs.iter().find(|n| n.id == id)
    }

    /// Display name, falling back to the id
    pub fn name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|n| n.name.as_str()).unwrap_or(id)
    }

    pub fn ids(&self) -> HashSet<&str> {
        self.npcs.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}
