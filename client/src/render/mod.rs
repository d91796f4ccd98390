pub mod font;
mod renderer;
mod ui;

pub use renderer::{Renderer, category_color, tile_color};
pub use font::BitmapFont;
