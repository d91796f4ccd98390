//! Inventory panel rendering

use macroquad::prelude::*;
use treasure_hunt_core::Game;

use crate::ui::{UiElementId, UiLayout};
use super::super::{category_color, Renderer};
use super::common::*;

const SLOTS_PER_ROW: usize = 6;
const MIN_ROWS: usize = 3;
const DETAILS_HEIGHT: f32 = 86.0;

impl Renderer {
    /// Draw a single inventory slot with its icon
    fn draw_inventory_slot(&self, x: f32, y: f32, category_color: Option<Color>, is_hovered: bool, is_selected: bool) {
        let size = INV_SLOT_SIZE;
        let border = if is_selected {
            SLOT_SELECTED_BORDER
        } else if is_hovered {
            SLOT_HOVER_BORDER
        } else {
            SLOT_BORDER
        };
        let bg = match (category_color.is_some(), is_hovered) {
            (_, true) => SLOT_HOVER_BG,
            (true, false) => SLOT_BG_FILLED,
            (false, false) => SLOT_BG_EMPTY,
        };

        draw_rectangle(x, y, size, size, border);
        draw_rectangle(x + 1.0, y + 1.0, size - 2.0, size - 2.0, bg);

        // Inner shadow (top/left)
        draw_line(x + 2.0, y + 2.0, x + size - 2.0, y + 2.0, 2.0, SLOT_INNER_SHADOW);
        draw_line(x + 2.0, y + 2.0, x + 2.0, y + size - 2.0, 2.0, SLOT_INNER_SHADOW);

        if let Some(color) = category_color {
            let cx = x + size / 2.0;
            let cy = y + size / 2.0;
            draw_poly(cx, cy, 4, size * 0.28, 45.0, color);
            draw_poly_lines(cx, cy, 4, size * 0.28, 45.0, 1.5, Color::from_rgba(60, 50, 30, 255));
        }
    }

    pub(crate) fn render_inventory(&self, game: &Game, hovered: Option<UiElementId>, layout: &mut UiLayout) {
        let (sw, sh) = (screen_width(), screen_height());
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.0, 0.0, 0.0, 0.588));

        let inventory = &game.state().inventory;
        let rows = inventory.len().div_ceil(SLOTS_PER_ROW).max(MIN_ROWS);
        let grid_w = SLOTS_PER_ROW as f32 * (INV_SLOT_SIZE + SLOT_SPACING) - SLOT_SPACING;
        let grid_h = rows as f32 * (INV_SLOT_SIZE + SLOT_SPACING) - SLOT_SPACING;

        let panel_width = grid_w + FRAME_THICKNESS * 2.0 + 32.0;
        let panel_height = HEADER_HEIGHT + grid_h + DETAILS_HEIGHT + FRAME_THICKNESS * 2.0 + 40.0;
        let panel_x = ((sw - panel_width) / 2.0).floor();
        let panel_y = ((sh - panel_height) / 2.0).floor();

        let title = format!("INVENTORY ({})", inventory.len());
        let grid_y = self.draw_titled_panel(panel_x, panel_y, panel_width, panel_height, &title, "[I] Close") + 8.0;
        let grid_x = panel_x + (panel_width - grid_w) / 2.0;

        let selected = game.selected_item();
        let mut hovered_index = None;

        for slot in 0..rows * SLOTS_PER_ROW {
            let x = grid_x + (slot % SLOTS_PER_ROW) as f32 * (INV_SLOT_SIZE + SLOT_SPACING);
            let y = grid_y + (slot / SLOTS_PER_ROW) as f32 * (INV_SLOT_SIZE + SLOT_SPACING);
            let item = inventory.iter().nth(slot);

            let is_hovered = item.is_some() && hovered == Some(UiElementId::InventorySlot(slot));
            if is_hovered {
                hovered_index = Some(slot);
            }
            if item.is_some() {
                layout.add(UiElementId::InventorySlot(slot), Rect::new(x, y, INV_SLOT_SIZE, INV_SLOT_SIZE));
            }

            let color = item.map(|i| category_color(i.item_type));
            self.draw_inventory_slot(x, y, color, is_hovered, selected == Some(slot));
        }

        // ===== DETAILS =====
        let details_x = panel_x + FRAME_THICKNESS + 12.0;
        let details_y = grid_y + grid_h + 12.0;
        let details_w = panel_width - FRAME_THICKNESS * 2.0 - 24.0;
        draw_line(details_x, details_y, details_x + details_w, details_y, 1.0, HEADER_BORDER);

        let shown = hovered_index.or(selected).and_then(|i| inventory.iter().nth(i));
        match shown {
            Some(item) => {
                let name = game.items().display_name(&item.name);
                self.draw_text_sharp(name, details_x, details_y + 22.0, 16.0, TEXT_TITLE);

                let category = item.item_type.as_str();
                let category_w = self.measure_text_sharp(category, 12.0).width;
                self.draw_text_sharp(category, details_x + details_w - category_w, details_y + 22.0, 12.0, category_color(item.item_type));

                self.draw_text_wrapped(&item.description, details_x, details_y + 42.0, 12.0, TEXT_NORMAL, details_w, 16.0);
            }
            None if inventory.is_empty() => {
                self.draw_text_sharp("Your pockets are empty.", details_x, details_y + 22.0, 16.0, TEXT_DIM);
                self.draw_text_sharp("Look around the office for useful things.", details_x, details_y + 42.0, 12.0, TEXT_DIM);
            }
            None => {
                self.draw_text_sharp("Select an item to read about it.", details_x, details_y + 22.0, 16.0, TEXT_DIM);
            }
        }

        // Close button in the header
        let close_size = 20.0;
        let close = Rect::new(
            panel_x + panel_width - FRAME_THICKNESS - close_size - 6.0,
            panel_y - close_size / 2.0,
            close_size,
            close_size,
        );
        layout.add(UiElementId::PanelClose, close);
        self.draw_button(close, "x", hovered == Some(UiElementId::PanelClose));
    }
}
