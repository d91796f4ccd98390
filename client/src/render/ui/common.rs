//! Common UI constants and helpers shared across UI components

use macroquad::prelude::*;
use super::super::Renderer;

// ============================================================================
// UI Color Palette
// ============================================================================

// Panel backgrounds (darker to lighter for depth)
pub const PANEL_BG_DARK: Color = Color::new(0.071, 0.071, 0.094, 0.961);    // rgba(18, 18, 24, 245)
pub const PANEL_BG_MID: Color = Color::new(0.110, 0.110, 0.149, 1.0);       // rgba(28, 28, 38, 255)

// Frame/Border colors (anniversary gold)
pub const FRAME_OUTER: Color = Color::new(0.322, 0.243, 0.165, 1.0);        // rgba(82, 62, 42, 255)
pub const FRAME_MID: Color = Color::new(0.557, 0.424, 0.267, 1.0);          // rgba(142, 108, 68, 255)
pub const FRAME_INNER: Color = Color::new(0.729, 0.580, 0.361, 1.0);        // rgba(186, 148, 92, 255)
pub const FRAME_ACCENT: Color = Color::new(0.855, 0.698, 0.424, 1.0);       // rgba(218, 178, 108, 255)

// Slot colors
pub const SLOT_BG_EMPTY: Color = Color::new(0.086, 0.086, 0.118, 1.0);      // rgba(22, 22, 30, 255)
pub const SLOT_BG_FILLED: Color = Color::new(0.125, 0.125, 0.173, 1.0);     // rgba(32, 32, 44, 255)
pub const SLOT_INNER_SHADOW: Color = Color::new(0.047, 0.047, 0.063, 1.0);  // rgba(12, 12, 16, 255)
pub const SLOT_BORDER: Color = Color::new(0.227, 0.212, 0.188, 1.0);        // rgba(58, 54, 48, 255)

// Hover/Selection states
pub const SLOT_HOVER_BG: Color = Color::new(0.188, 0.188, 0.282, 1.0);      // rgba(48, 48, 72, 255)
pub const SLOT_HOVER_BORDER: Color = Color::new(0.659, 0.580, 0.424, 1.0);  // rgba(168, 148, 108, 255)
pub const SLOT_SELECTED_BORDER: Color = Color::new(0.855, 0.737, 0.502, 1.0); // rgba(218, 188, 128, 255)

// Header/Footer
pub const HEADER_BG: Color = Color::new(0.141, 0.125, 0.165, 1.0);          // rgba(36, 32, 42, 255)
pub const HEADER_BORDER: Color = Color::new(0.463, 0.384, 0.267, 1.0);      // rgba(118, 98, 68, 255)
pub const FOOTER_BG: Color = Color::new(0.094, 0.086, 0.110, 1.0);          // rgba(24, 22, 28, 255)

// Text colors
pub const TEXT_TITLE: Color = Color::new(0.855, 0.737, 0.502, 1.0);         // rgba(218, 188, 128, 255)
pub const TEXT_NORMAL: Color = Color::new(0.824, 0.824, 0.855, 1.0);        // rgba(210, 210, 218, 255)
pub const TEXT_DIM: Color = Color::new(0.502, 0.502, 0.541, 1.0);           // rgba(128, 128, 138, 255)
pub const TEXT_GOLD: Color = Color::new(1.0, 0.843, 0.314, 1.0);            // rgba(255, 215, 80, 255)
pub const TEXT_SUCCESS: Color = Color::new(0.392, 1.0, 0.392, 1.0);         // rgba(100, 255, 100, 255)

// Item category colors
pub const CATEGORY_QUEST: Color = Color::new(1.0, 0.824, 0.314, 1.0);        // rgba(255, 210, 80, 255)
pub const CATEGORY_KEY: Color = Color::new(0.345, 0.549, 0.824, 1.0);        // rgba(88, 140, 210, 255)
pub const CATEGORY_CONSUMABLE: Color = Color::new(0.824, 0.345, 0.345, 1.0); // rgba(210, 88, 88, 255)
pub const CATEGORY_DOCUMENT: Color = Color::new(0.620, 0.620, 0.659, 1.0);   // rgba(158, 158, 168, 255)
pub const CATEGORY_COLLECTIBLE: Color = Color::new(0.580, 0.424, 0.824, 1.0); // rgba(148, 108, 210, 255)

// ============================================================================
// Layout Constants
// ============================================================================

pub const HEADER_HEIGHT: f32 = 40.0;
pub const FOOTER_HEIGHT: f32 = 30.0;
pub const FRAME_THICKNESS: f32 = 4.0;
pub const CORNER_ACCENT_SIZE: f32 = 8.0;
pub const INV_SLOT_SIZE: f32 = 48.0;
pub const SLOT_SPACING: f32 = 4.0;

impl Renderer {
    /// Three-layer beveled frame around a dark panel
    pub(crate) fn draw_panel_frame(&self, x: f32, y: f32, w: f32, h: f32) {
        draw_rectangle(x, y, w, h, FRAME_OUTER);
        draw_rectangle(x + 1.0, y + 1.0, w - 2.0, h - 2.0, FRAME_MID);
        draw_rectangle(x + 2.0, y + 2.0, w - 4.0, h - 4.0, FRAME_INNER);
        draw_rectangle(
            x + FRAME_THICKNESS,
            y + FRAME_THICKNESS,
            w - FRAME_THICKNESS * 2.0,
            h - FRAME_THICKNESS * 2.0,
            PANEL_BG_DARK,
        );
    }

    pub(crate) fn draw_corner_accents(&self, x: f32, y: f32, w: f32, h: f32) {
        let s = CORNER_ACCENT_SIZE;
        for (cx, cy) in [(x, y), (x + w - s, y), (x, y + h - s), (x + w - s, y + h - s)] {
            draw_rectangle(cx, cy, s, s, FRAME_OUTER);
            draw_rectangle(cx + 1.0, cy + 1.0, s - 2.0, s - 2.0, FRAME_ACCENT);
        }
    }

    /// Panel with a title bar. Returns the y where content starts.
    pub(crate) fn draw_titled_panel(&self, x: f32, y: f32, w: f32, h: f32, title: &str, hint: &str) -> f32 {
        self.draw_panel_frame(x, y, w, h);
        self.draw_corner_accents(x, y, w, h);

        let header_x = x + FRAME_THICKNESS;
        let header_y = y + FRAME_THICKNESS;
        let header_w = w - FRAME_THICKNESS * 2.0;

        draw_rectangle(header_x, header_y, header_w, HEADER_HEIGHT, HEADER_BG);
        draw_line(header_x + 10.0, header_y + HEADER_HEIGHT, header_x + header_w - 10.0, header_y + HEADER_HEIGHT, 2.0, HEADER_BORDER);

        self.draw_text_sharp(title, header_x + 12.0, header_y + 26.0, 16.0, TEXT_TITLE);
        if !hint.is_empty() {
            let hint_w = self.measure_text_sharp(hint, 16.0).width;
            self.draw_text_sharp(hint, header_x + header_w - hint_w - 12.0, header_y + 26.0, 16.0, TEXT_DIM);
        }

        header_y + HEADER_HEIGHT + 8.0
    }

    /// Button with hover highlight, text centered
    pub(crate) fn draw_button(&self, bounds: Rect, text: &str, is_hovered: bool) {
        let (bg_color, border_color) = if is_hovered {
            (SLOT_HOVER_BG, SLOT_HOVER_BORDER)
        } else {
            (SLOT_BG_EMPTY, SLOT_BORDER)
        };

        draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, border_color);
        draw_rectangle(bounds.x + 1.0, bounds.y + 1.0, bounds.w - 2.0, bounds.h - 2.0, bg_color);
        if is_hovered {
            draw_line(bounds.x + 2.0, bounds.y + 2.0, bounds.x + bounds.w - 2.0, bounds.y + 2.0, 1.0, FRAME_INNER);
        }

        let text_width = self.measure_text_sharp(text, 16.0).width;
        let text_color = if is_hovered { TEXT_TITLE } else { TEXT_NORMAL };
        self.draw_text_sharp(
            text,
            (bounds.x + (bounds.w - text_width) / 2.0).floor(),
            (bounds.y + bounds.h / 2.0 + 5.0).floor(),
            16.0,
            text_color,
        );
    }
}
