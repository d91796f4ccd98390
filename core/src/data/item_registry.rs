use std::collections::HashMap;
use tracing::{info, warn};

use super::item_def::{ItemDefinition, RawItemDefinition};
use crate::inventory::InventoryItem;

const BUILTIN_ITEMS: &str = include_str!("../../data/items.toml");

/// Registry for all item definitions
pub struct ItemRegistry {
    items: HashMap<String, ItemDefinition>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Registry loaded from the item table compiled into the crate
    pub fn builtin() -> Result<Self, String> {
        let mut registry = Self::new();
        registry.load_from_str(BUILTIN_ITEMS)
            .map_err(|e| format!("Failed to load built-in items: {}", e))?;
        Ok(registry)
    }

    /// Parse a TOML table of items and add them to the registry
    pub fn load_from_str(&mut self, content: &str) -> Result<(), String> {
        let table: HashMap<String, RawItemDefinition> = toml::from_str(content)
            .map_err(|e| format!("Failed to parse item table: {}", e))?;

        for (id, raw) in table {
            if self.items.contains_key(&id) {
                warn!("Duplicate item ID '{}', overwriting", id);
            }
            let item = ItemDefinition::from_raw(&id, &raw);
            self.items.insert(id, item);
        }

        info!("Loaded {} item definitions", self.items.len());

        Ok(())
    }

    /// Get an item definition by ID
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Get item definition or a placeholder for unknown items
    pub fn get_or_placeholder(&self, id: &str) -> ItemDefinition {
        self.items.get(id).cloned().unwrap_or_else(|| ItemDefinition::placeholder(id))
    }

    /// Get display name for an item ID
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.items
            .get(id)
            .map(|def| def.display_name.as_str())
            .unwrap_or(id)
    }

    /// Build the inventory entry handed to the player when this item is collected
    pub fn make_inventory_item(&self, id: &str) -> InventoryItem {
        let def = self.get_or_placeholder(id);
        InventoryItem {
            name: def.id,
            item_type: def.category,
            description: def.description,
        }
    }

    /// Check if an item exists
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Get all item IDs
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.items.keys()
    }

    /// Get the number of loaded items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ItemCategory;

    #[test]
    fn test_builtin_items_load() {
        let registry = ItemRegistry::builtin().unwrap();
        assert!(registry.len() >= 20);

        let keycard = registry.get("office_keycard").unwrap();
        assert_eq!(keycard.display_name, "Office Keycard");
        assert_eq!(keycard.category, ItemCategory::Key);
    }

    #[test]
    fn test_unknown_item_placeholder() {
        let registry = ItemRegistry::builtin().unwrap();
        let item = registry.make_inventory_item("rubber_duck");
        assert_eq!(item.name, "rubber_duck");
        assert_eq!(registry.display_name("rubber_duck"), "rubber_duck");
    }

    #[test]
    fn test_category_defaults_to_quest() {
        let mut registry = ItemRegistry::new();
        registry.load_from_str("[stapler]\ndisplay_name = \"Stapler\"\n").unwrap();
        assert_eq!(registry.get("stapler").unwrap().category, ItemCategory::Quest);
    }
}
