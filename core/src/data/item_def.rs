use serde::{Deserialize, Serialize};

// ============================================================================
// Item Categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Handed to a quest giver
    #[default]
    Quest,
    /// Opens doors or unlocks machines, never consumed by them
    Key,
    /// Used up by a minigame
    Consumable,
    Document,
    Collectible,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Quest => "quest",
            ItemCategory::Key => "key",
            ItemCategory::Consumable => "consumable",
            ItemCategory::Document => "document",
            ItemCategory::Collectible => "collectible",
        }
    }
}

// ============================================================================
// Raw Item Definition (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawItemDefinition {
    pub display_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub category: ItemCategory,
}

// ============================================================================
// Resolved Item Definition
// ============================================================================

#[derive(Debug, Clone)]
pub struct ItemDefinition {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub category: ItemCategory,
}

impl ItemDefinition {
    pub fn from_raw(id: &str, raw: &RawItemDefinition) -> Self {
        Self {
            id: id.to_string(),
            display_name: raw.display_name.clone()
                .unwrap_or_else(|| id.to_string()),
            description: raw.description.clone()
                .unwrap_or_default(),
            category: raw.category,
        }
    }

    /// Placeholder for names missing from the table (old saves, typos in map data)
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: format!("Unknown ({})", id),
            description: "Unknown item".to_string(),
            category: ItemCategory::Collectible,
        }
    }
}
