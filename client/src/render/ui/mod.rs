//! UI rendering components split from the main renderer

pub mod common;
pub mod dialogue;
pub mod hud;
pub mod inventory;
pub mod menu;
pub mod quest;
pub mod quiz;
