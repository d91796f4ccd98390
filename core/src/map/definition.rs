use serde::{Deserialize, Serialize};

use super::tile::Tile;
use crate::state::GameState;

/// Minigame machines placed on maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Vending,
    Printer,
    Computer,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Vending => "vending",
            ObjectKind::Printer => "printer",
            ObjectKind::Computer => "computer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ObjectKind::Vending => "Vending Machine",
            ObjectKind::Printer => "Printer",
            ObjectKind::Computer => "Computer",
        }
    }
}

/// A door tile leading to another map
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Door {
    pub x: i32,
    pub y: i32,
    pub target: String,
    pub target_x: i32,
    pub target_y: i32,
    /// Item the player must hold to pass
    #[serde(default)]
    pub requires_item: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NpcPlacement {
    pub id: String,
    pub x: i32,
    pub y: i32,
}

/// An item lying on the floor. `id` is unique across all maps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemPlacement {
    pub id: String,
    pub item: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectPlacement {
    pub id: String,
    pub kind: ObjectKind,
    pub x: i32,
    pub y: i32,
}

/// Map file as written in TOML
#[derive(Debug, Deserialize)]
pub struct RawMap {
    pub id: String,
    pub name: String,
    pub spawn: [i32; 2],
    pub rows: Vec<String>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub npcs: Vec<NpcPlacement>,
    #[serde(default)]
    pub items: Vec<ItemPlacement>,
    #[serde(default)]
    pub objects: Vec<ObjectPlacement>,
}

#[derive(Debug, Clone)]
pub struct MapDefinition {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
    pub spawn: (i32, i32),
    pub doors: Vec<Door>,
    pub npcs: Vec<NpcPlacement>,
    pub items: Vec<ItemPlacement>,
    pub objects: Vec<ObjectPlacement>,
}

impl MapDefinition {
    pub fn from_raw(raw: RawMap) -> Result<Self, String> {
        let height = raw.rows.len() as u32;
        let width = raw.rows.first().map(|r| r.chars().count()).unwrap_or(0) as u32;
        if width == 0 || height == 0 {
            return Err(format!("Map '{}' is empty", raw.id));
        }

        let mut tiles = Vec::with_capacity((width * height) as usize);
        for (y, row) in raw.rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(format!("Map '{}' row {} is not {} tiles wide", raw.id, y, width));
            }
            for (x, c) in row.chars().enumerate() {
                let tile = Tile::from_char(c)
                    .ok_or_else(|| format!("Map '{}' has unknown tile '{}' at {},{}", raw.id, c, x, y))?;
                tiles.push(tile);
            }
        }

        let map = Self {
            id: raw.id,
            name: raw.name,
            width,
            height,
            tiles,
            spawn: (raw.spawn[0], raw.spawn[1]),
            doors: raw.doors,
            npcs: raw.npcs,
            items: raw.items,
            objects: raw.objects,
        };

        let positions = std::iter::once(map.spawn)
            .chain(map.doors.iter().map(|d| (d.x, d.y)))
            .chain(map.npcs.iter().map(|n| (n.x, n.y)))
            .chain(map.items.iter().map(|i| (i.x, i.y)))
            .chain(map.objects.iter().map(|o| (o.x, o.y)));
        for (x, y) in positions {
            if !map.in_bounds(x, y) {
                return Err(format!("Map '{}' places something outside the map at {},{}", map.id, x, y));
            }
        }

        Ok(map)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.tiles.get((y as u32 * self.width + x as u32) as usize).copied()
    }

    /// Inside the map, on a walkable tile, and not occupied by an NPC or machine
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).map_or(false, Tile::is_walkable)
            && self.npc_at(x, y).is_none()
            && self.object_at(x, y).is_none()
    }

    pub fn door_at(&self, x: i32, y: i32) -> Option<&Door> {
        self.doors.iter().find(|d| d.x == x && d.y == y)
    }

    pub fn npc_at(&self, x: i32, y: i32) -> Option<&NpcPlacement> {
        self.npcs.iter().find(|n| n.x == x && n.y == y)
    }

    pub fn object_at(&self, x: i32, y: i32) -> Option<&ObjectPlacement> {
        self.objects.iter().find(|o| o.x == x && o.y == y)
    }

    /// Item lying at this position that hasn't been picked up yet
    pub fn item_at(&self, x: i32, y: i32, state: &GameState) -> Option<&ItemPlacement> {
        self.items.iter()
            .find(|i| i.x == x && i.y == y && !state.is_picked_up(&i.id))
    }

    /// Items still lying around
    pub fn visible_items<'a>(&'a self, state: &'a GameState) -> impl Iterator<Item = &'a ItemPlacement> + 'a {
        self.items.iter().filter(move |i| !state.is_picked_up(&i.id))
    }

    /// The item a locked door wants, if the player doesn't hold it
    pub fn door_lock<'a>(&self, door: &'a Door, state: &GameState) -> Option<&'a str> {
        match &door.requires_item {
            Some(item) if !state.has_item(item) => Some(item.as_str()),
            _ => None,
        }
    }

    /// Row-major tiles, for the renderer
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        let width = self.width as i32;
        self.tiles.iter().enumerate()
            .map(move |(i, t)| (i as i32 % width, i as i32 / width, *t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> MapDefinition {
        let raw: RawMap = toml::from_str(r#"
            id = "test"
            name = "Test"
            spawn = [1, 1]
            rows = [
                '#####',
                '#...+',
                '#.T.#',
                '#####',
            ]

            [[doors]]
            x = 4
            y = 1
            target = "elsewhere"
            target_x = 1
            target_y = 1
            requires_item = "office_keycard"

            [[npcs]]
            id = "bob"
            x = 3
            y = 2

            [[items]]
            id = "test_coin"
            item = "coin"
            x = 2
            y = 1

            [[objects]]
            id = "test_printer"
            kind = "printer"
            x = 1
            y = 2
        "#).unwrap();
        MapDefinition::from_raw(raw).unwrap()
    }

    #[test]
    fn test_walkability() {
        let map = small_map();
        assert_eq!((map.width, map.height), (5, 4));
        assert!(map.is_walkable(1, 1));
        assert!(map.is_walkable(4, 1));
        assert!(!map.is_walkable(0, 0));
        assert!(!map.is_walkable(2, 2));
        // NPC and machine block
        assert!(!map.is_walkable(3, 2));
        assert!(!map.is_walkable(1, 2));
        assert!(!map.is_walkable(-1, 1));
        assert!(!map.is_walkable(5, 1));
    }

    #[test]
    fn test_picked_up_items_disappear() {
        let map = small_map();
        let mut state = GameState::new();
        assert_eq!(map.item_at(2, 1, &state).unwrap().item, "coin");
        state.picked_up.insert("test_coin".to_string());
        assert!(map.item_at(2, 1, &state).is_none());
        assert_eq!(map.visible_items(&state).count(), 0);
    }

    #[test]
    fn test_door_lock() {
        let map = small_map();
        let door = map.door_at(4, 1).unwrap();
        let mut state = GameState::new();
        assert_eq!(map.door_lock(door, &state), Some("office_keycard"));
        state.inventory.add(crate::inventory::InventoryItem::new(
            "office_keycard",
            crate::data::ItemCategory::Key,
            "",
        ));
        assert_eq!(map.door_lock(door, &state), None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let raw: RawMap = toml::from_str(r#"
            id = "bad"
            name = "Bad"
            spawn = [1, 1]
            rows = ['###', '#.', '###']
        "#).unwrap();
        assert!(MapDefinition::from_raw(raw).is_err());
    }

    #[test]
    fn test_tiles_iterates_row_major() {
        let map = small_map();
        let tiles: Vec<_> = map.tiles().collect();
        assert_eq!(tiles.len(), 20);
        assert_eq!(tiles[9], (4, 1, Tile::Door));
    }
}
