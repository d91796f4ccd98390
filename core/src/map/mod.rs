//! Office maps: tile grids with doors, NPC and item placements, and minigame machines.

pub mod tile;
pub mod definition;
pub mod manager;

pub use tile::Tile;
pub use definition::{Door, ItemPlacement, MapDefinition, NpcPlacement, ObjectKind, ObjectPlacement};
pub use manager::{MapManager, START_MAP};
