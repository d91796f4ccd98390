//! Map Manager
//!
//! Holds every office map and tracks which one the player is on.

use std::collections::HashSet;
use tracing::{info, warn};

use super::definition::{MapDefinition, RawMap};
use crate::data::ItemRegistry;
use crate::state::GameState;

const BUILTIN_MAPS: &[(&str, &str)] = &[
    ("lobby", include_str!("../../data/maps/lobby.toml")),
    ("office", include_str!("../../data/maps/office.toml")),
    ("break_room", include_str!("../../data/maps/break_room.toml")),
    ("server_room", include_str!("../../data/maps/server_room.toml")),
    ("ceo_office", include_str!("../../data/maps/ceo_office.toml")),
];

/// Map the game starts on
pub const START_MAP: &str = "lobby";

pub struct MapManager {
    maps: Vec<MapDefinition>,
    current: usize,
}

impl MapManager {
    pub fn new(maps: Vec<MapDefinition>) -> Result<Self, String> {
        if maps.is_empty() {
            return Err("No maps loaded".to_string());
        }
        let current = maps.iter().position(|m| m.id == START_MAP).unwrap_or(0);
        Ok(Self { maps, current })
    }

    /// All maps compiled into the crate
    pub fn builtin() -> Result<Self, String> {
        let mut maps = Vec::with_capacity(BUILTIN_MAPS.len());
        for (name, content) in BUILTIN_MAPS {
            maps.push(Self::parse_map(name, content)?);
        }
        Self::new(maps)
    }

    pub fn parse_map(name: &str, content: &str) -> Result<MapDefinition, String> {
        let raw: RawMap = toml::from_str(content)
            .map_err(|e| format!("Failed to parse map {}: {}", name, e))?;
        let map = MapDefinition::from_raw(raw)?;
        info!("Loaded map: {} ({}x{})", map.id, map.width, map.height);
        Ok(map)
    }

    pub fn current(&self) -> &MapDefinition {
        &self.maps[self.current]
    }

    pub fn current_id(&self) -> &str {
        &self.current().id
    }

    pub fn get(&self, id: &str) -> Option<&MapDefinition> {
        self.maps.iter().find(|m| m.id == id)
    }

    pub fn maps(&self) -> &[MapDefinition] {
        &self.maps
    }

    /// Switch to another map and mark it visited
    pub fn change_map(&mut self, map_id: &str, state: &mut GameState) -> Result<&MapDefinition, String> {
        let index = self.maps.iter()
            .position(|m| m.id == map_id)
            .ok_or_else(|| format!("Unknown map '{}'", map_id))?;
        self.current = index;
        if state.visit_map(map_id) {
            info!("First visit to {}", map_id);
        }
        Ok(self.current())
    }

    pub fn is_walkable(&self, map_id: &str, x: i32, y: i32) -> bool {
        self.get(map_id).map_or(false, |m| m.is_walkable(x, y))
    }

    /// Check doors, placements and NPCs against the other tables.
    /// Returns the number of problems found.
    pub fn validate(&self, items: &ItemRegistry, npc_ids: &HashSet<&str>) -> usize {
        let mut problems = 0;
        let mut placement_ids = HashSet::new();

        for map in &self.maps {
            if !map.is_walkable(map.spawn.0, map.spawn.1) {
                warn!("Map '{}' spawn is blocked", map.id);
                problems += 1;
            }

            for door in &map.doors {
                match self.get(&door.target) {
                    Some(target) if target.is_walkable(door.target_x, door.target_y) => {}
                    Some(_) => {
                        warn!("Door in '{}' at {},{} leads onto a blocked tile", map.id, door.x, door.y);
                        problems += 1;
                    }
                    None => {
                        warn!("Door in '{}' leads to unknown map '{}'", map.id, door.target);
                        problems += 1;
                    }
                }
                if let Some(item) = &door.requires_item {
                    if !items.contains(item) {
                        warn!("Door in '{}' requires unknown item '{}'", map.id, item);
                        problems += 1;
                    }
                }
            }

            for npc in &map.npcs {
                if !npc_ids.contains(npc.id.as_str()) {
                    warn!("Map '{}' places unknown NPC '{}'", map.id, npc.id);
                    problems += 1;
                }
            }

            for item in &map.items {
                if !items.contains(&item.item) {
                    warn!("Map '{}' places unknown item '{}'", map.id, item.item);
                    problems += 1;
                }
                if !placement_ids.insert(item.id.as_str()) {
                    warn!("Duplicate item placement id '{}'", item.id);
                    problems += 1;
                }
                if !map.is_walkable(item.x, item.y) {
                    warn!("Item '{}' in '{}' can't be reached", item.id, map.id);
                    problems += 1;
                }
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npc::NpcRegistry;

    #[test]
    fn test_builtin_maps_load() {
        let maps = MapManager::builtin().unwrap();
        assert_eq!(maps.maps().len(), 5);
        assert_eq!(maps.current_id(), START_MAP);
    }

    #[test]
    fn test_builtin_maps_are_consistent() {
        let maps = MapManager::builtin().unwrap();
        let items = ItemRegistry::builtin().unwrap();
        let npcs = NpcRegistry::builtin().unwrap();
        assert_eq!(maps.validate(&items, &npcs.ids()), 0);
    }

    #[test]
    fn test_change_map_marks_visited() {
        let mut maps = MapManager::builtin().unwrap();
        let mut state = GameState::new();
        assert_eq!(maps.change_map("office", &mut state).unwrap().id, "office");
        assert!(state.visited_maps.contains("office"));
        assert!(maps.change_map("moon", &mut state).is_err());
        assert_eq!(maps.current_id(), "office");
    }

    #[test]
    fn test_walls_and_npcs_block() {
        let maps = MapManager::builtin().unwrap();
        assert!(!maps.is_walkable("lobby", 0, 0));
        assert!(!maps.is_walkable("lobby", 5, 2));
        assert!(maps.is_walkable("lobby", 7, 8));
        assert!(!maps.is_walkable("nowhere", 1, 1));
    }
}
