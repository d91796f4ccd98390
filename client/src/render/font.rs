//! Multi-size pixel font for crisp text rendering
//!
//! Loads the pixel font once per native size to avoid scaling artifacts.
//! Falls back to macroquad's built-in font when the file is missing.

use macroquad::file::load_file;
use macroquad::prelude::*;
use std::collections::HashMap;

/// Available font sizes - these are pre-loaded at native resolution
pub const FONT_SIZES: &[u16] = &[12, 16, 20, 24, 32];

/// Multi-size bitmap font that provides pixel-perfect rendering
#[derive(Default)]
pub struct BitmapFont {
    /// Fonts keyed by their native size
    fonts: HashMap<u16, Font>,
}

impl BitmapFont {
    /// Load from a path, or an empty font that draws with the default one
    pub async fn load_or_default(path: &str) -> Self {
        let mut fonts = HashMap::new();

        let font_bytes = match load_file(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read font file {}: {}", path, e);
                return Self { fonts };
            }
        };

        for &size in FONT_SIZES {
            match load_ttf_font_from_bytes(&font_bytes) {
                Ok(mut font) => {
                    font.set_filter(FilterMode::Nearest);
                    fonts.insert(size, font);
                }
                Err(e) => {
                    log::warn!("Failed to load font at size {}: {}", size, e);
                }
            }
        }

        Self { fonts }
    }

    /// Closest native size at or below the requested one
    fn closest_size(requested: f32) -> u16 {
        let requested = requested.round() as u16;
        FONT_SIZES
            .iter()
            .rev()
            .find(|&&s| s <= requested)
            .copied()
            .unwrap_or(FONT_SIZES[0])
    }

    pub fn draw_text(&self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        let native_size = Self::closest_size(font_size);

        if let Some(font) = self.fonts.get(&native_size) {
            draw_text_ex(
                text,
                x.floor(),
                y.floor(),
                TextParams {
                    font: Some(font),
                    font_size: native_size,
                    font_scale: font_size / native_size as f32,
                    color,
                    ..Default::default()
                },
            );
        } else {
            draw_text(text, x.floor(), y.floor(), font_size, color);
        }
    }

    pub fn measure_text(&self, text: &str, font_size: f32) -> TextDimensions {
        let native_size = Self::closest_size(font_size);

        match self.fonts.get(&native_size) {
            Some(font) => measure_text(text, Some(font), native_size, font_size / native_size as f32),
            None => measure_text(text, None, font_size as u16, 1.0),
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_size() {
        assert_eq!(BitmapFont::closest_size(16.0), 16);
        assert_eq!(BitmapFont::closest_size(18.0), 16);
        assert_eq!(BitmapFont::closest_size(100.0), 32);
        assert_eq!(BitmapFont::closest_size(4.0), 12);
    }
}
