//! Title and victory screens

use macroquad::prelude::*;
use treasure_hunt_core::Game;

use crate::ui::{UiElementId, UiLayout};
use super::super::Renderer;
use super::common::*;

const BUTTON_WIDTH: f32 = 220.0;
const BUTTON_HEIGHT: f32 = 34.0;
const BUTTON_SPACING: f32 = 12.0;

impl Renderer {
    /// Vertical list of buttons registered as `MenuEntry(i)`
    fn draw_menu_entries(&self, entries: &[(&str, bool)], center_x: f32, top: f32, hovered: Option<UiElementId>, layout: &mut UiLayout) {
        for (i, (text, enabled)) in entries.iter().enumerate() {
            let bounds = Rect::new(
                (center_x - BUTTON_WIDTH / 2.0).floor(),
                (top + i as f32 * (BUTTON_HEIGHT + BUTTON_SPACING)).floor(),
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            );
            if *enabled {
                layout.add(UiElementId::MenuEntry(i), bounds);
                self.draw_button(bounds, text, hovered == Some(UiElementId::MenuEntry(i)));
            } else {
                draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, SLOT_BORDER);
                draw_rectangle(bounds.x + 1.0, bounds.y + 1.0, bounds.w - 2.0, bounds.h - 2.0, SLOT_BG_EMPTY);
                let w = self.measure_text_sharp(text, 16.0).width;
                self.draw_text_sharp(text, bounds.x + (bounds.w - w) / 2.0, bounds.y + bounds.h / 2.0 + 5.0, 16.0, TEXT_DIM);
            }
        }
    }

    fn draw_centered(&self, text: &str, y: f32, size: f32, color: Color) {
        let w = self.measure_text_sharp(text, size).width;
        self.draw_text_sharp(text, ((screen_width() - w) / 2.0).floor(), y, size, color);
    }

    pub(crate) fn render_title(&self, game: &Game, hovered: Option<UiElementId>, layout: &mut UiLayout) {
        let (sw, sh) = (screen_width(), screen_height());
        clear_background(Color::from_rgba(24, 22, 30, 255));

        // Confetti-like floor pattern
        let ts = game.config().tile_size;
        let mut y = 0.0;
        while y < sh {
            let mut x = if ((y / ts) as i32) % 2 == 0 { 0.0 } else { ts };
            while x < sw {
                draw_rectangle(x, y, ts, ts, Color::from_rgba(30, 28, 38, 255));
                x += ts * 2.0;
            }
            y += ts;
        }

        let panel_w = 420.0_f32.min(sw - 20.0);
        let panel_h = 300.0;
        let panel_x = ((sw - panel_w) / 2.0).floor();
        let panel_y = ((sh - panel_h) / 2.0).floor();
        self.draw_panel_frame(panel_x, panel_y, panel_w, panel_h);
        self.draw_corner_accents(panel_x, panel_y, panel_w, panel_h);

        self.draw_centered("ANNIVERSARY", panel_y + 52.0, 32.0, TEXT_GOLD);
        self.draw_centered("TREASURE HUNT", panel_y + 84.0, 24.0, TEXT_TITLE);
        self.draw_centered("Find the treasure hidden somewhere in the office", panel_y + 112.0, 12.0, TEXT_DIM);

        let entries = [("New Game [N]", true), ("Continue [C]", game.has_save())];
        self.draw_menu_entries(&entries, sw / 2.0, panel_y + 140.0, hovered, layout);
    }

    pub(crate) fn render_victory(&self, game: &Game, hovered: Option<UiElementId>, layout: &mut UiLayout) {
        let (sw, sh) = (screen_width(), screen_height());
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.0, 0.0, 0.0, 0.65));

        // Falling confetti
        let t = get_time() as f32;
        for i in 0..60 {
            let seed = i as f32 * 37.13;
            let x = (seed * 13.7) % sw;
            let y = (seed * 7.3 + t * (40.0 + (i % 7) as f32 * 12.0)) % sh;
            let color = match i % 4 {
                0 => TEXT_GOLD,
                1 => CATEGORY_KEY,
                2 => CATEGORY_CONSUMABLE,
                _ => TEXT_SUCCESS,
            };
            draw_rectangle(x, y, 4.0, 6.0, color);
        }

        let panel_w = 460.0_f32.min(sw - 20.0);
        let panel_h = 260.0;
        let panel_x = ((sw - panel_w) / 2.0).floor();
        let panel_y = ((sh - panel_h) / 2.0).floor();
        self.draw_panel_frame(panel_x, panel_y, panel_w, panel_h);
        self.draw_corner_accents(panel_x, panel_y, panel_w, panel_h);

        self.draw_centered("HAPPY ANNIVERSARY!", panel_y + 50.0, 32.0, TEXT_GOLD);
        self.draw_centered("You found the treasure.", panel_y + 80.0, 16.0, TEXT_NORMAL);

        let summary = format!(
            "{} quests completed, {} items collected",
            game.quests().log().completed_count(),
            game.state().items_collected
        );
        self.draw_centered(&summary, panel_y + 102.0, 12.0, TEXT_DIM);

        let entries = [("Play Again [N]", true), ("Keep Exploring", true)];
        self.draw_menu_entries(&entries, sw / 2.0, panel_y + 140.0, hovered, layout);
    }
}
