pub mod layout;

pub use layout::{UiElementId, UiElement, UiLayout};
