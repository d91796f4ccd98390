//! Game rules for the office anniversary treasure hunt.
//!
//! No graphics here: the client crate draws whatever `Game` exposes and
//! feeds it `GameCommand`s.

pub mod camera;
pub mod config;
pub mod data;
pub mod dialogue;
pub mod game;
pub mod inventory;
pub mod map;
pub mod minigame;
pub mod npc;
pub mod player;
pub mod quest;
pub mod quiz;
pub mod save;
pub mod state;

pub use camera::Camera;
pub use config::GameConfig;
pub use game::{Game, GameCommand, GameMode, Notification};
pub use player::{Direction, Player};
pub use save::{FileStorage, MemoryStorage, SaveError, SaveStorage};
pub use state::GameState;
