use serde::{Deserialize, Serialize};

use crate::data::ItemCategory;

// ============================================================================
// Inventory Items
// ============================================================================

/// An item the player carries. Created on collection, removed on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    #[serde(rename = "type", default)]
    pub item_type: ItemCategory,
    #[serde(default)]
    pub description: String,
}

impl InventoryItem {
    pub fn new(name: &str, item_type: ItemCategory, description: &str) -> Self {
        Self {
            name: name.to_string(),
            item_type,
            description: description.to_string(),
        }
    }
}

// ============================================================================
// Inventory
// ============================================================================

/// Player's inventory, in pickup order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: InventoryItem) {
        self.items.push(item);
    }

    /// Remove the first item with this name
    pub fn remove_first(&mut self, name: &str) -> Option<InventoryItem> {
        let index = self.items.iter().position(|item| item.name == name)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Count items with this name
    pub fn count(&self, name: &str) -> usize {
        self.items.iter().filter(|item| item.name == name).count()
    }

    /// Required names not covered by the inventory. A name listed twice needs two items.
    pub fn missing<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        let mut missing = Vec::new();
        for (i, name) in required.iter().enumerate() {
            let needed = required[..=i].iter().filter(|n| *n == name).count();
            if self.count(name) < needed {
                missing.push(name.as_str());
            }
        }
        missing
    }

    /// Every required name is present by string equality
    pub fn has_all(&self, required: &[String]) -> bool {
        self.missing(required).is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }
}
