//! Heads-up display: location, quest tracker, key hints and notifications

use macroquad::prelude::*;
use treasure_hunt_core::Game;

use crate::util::faded;
use super::super::Renderer;
use super::common::*;

const TOP_BAR_HEIGHT: f32 = 28.0;
const NOTIFICATION_HEIGHT: f32 = 26.0;

impl Renderer {
    pub(crate) fn render_hud(&self, game: &Game) {
        let sw = screen_width();
        let sh = screen_height();

        // Top bar
        draw_rectangle(0.0, 0.0, sw, TOP_BAR_HEIGHT, Color::new(0.0, 0.0, 0.0, 0.55));
        draw_line(0.0, TOP_BAR_HEIGHT, sw, TOP_BAR_HEIGHT, 1.0, HEADER_BORDER);
        self.draw_text_sharp(&game.current_map().name, 10.0, 19.0, 16.0, TEXT_TITLE);

        let log = game.quests().log();
        let status = format!(
            "Quests {}/{}   Items {}",
            log.completed_count(),
            log.quests.len(),
            game.state().inventory.len()
        );
        let status_w = self.measure_text_sharp(&status, 16.0).width;
        self.draw_text_sharp(&status, sw - status_w - 10.0, 19.0, 16.0, TEXT_NORMAL);

        self.render_quest_tracker(game, TOP_BAR_HEIGHT + 22.0);

        // Controls
        let hint = "[WASD] Move  [E] Interact  [I] Inventory  [Q] Quests  [F5] Save";
        self.draw_text_sharp(hint, 10.0, sh - 10.0, 12.0, faded(TEXT_NORMAL, 0.7));
    }

    /// Stacked messages, newest at the bottom, fading out
    pub(crate) fn render_notifications(&self, game: &Game) {
        let notifications = game.notifications();
        if notifications.is_empty() {
            return;
        }

        let sw = screen_width();
        let start_y = screen_height() * 0.22;

        for (i, notification) in notifications.iter().enumerate() {
            let alpha = (notification.alpha() * 2.0).min(1.0);
            let text_w = self.measure_text_sharp(&notification.text, 16.0).width;
            let box_w = text_w + 24.0;
            let box_x = ((sw - box_w) / 2.0).floor();
            let box_y = start_y + i as f32 * (NOTIFICATION_HEIGHT + 4.0);

            draw_rectangle(box_x, box_y, box_w, NOTIFICATION_HEIGHT, faded(PANEL_BG_MID, alpha * 0.9));
            draw_rectangle_lines(box_x, box_y, box_w, NOTIFICATION_HEIGHT, 1.0, faded(FRAME_MID, alpha));
            self.draw_text_sharp(&notification.text, box_x + 12.0, box_y + 18.0, 16.0, faded(TEXT_GOLD, alpha));
        }
    }
}
