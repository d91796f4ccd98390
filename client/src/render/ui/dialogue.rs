//! NPC dialogue panel rendering

use macroquad::prelude::*;
use treasure_hunt_core::dialogue::DialogueSession;
use treasure_hunt_core::Game;

use crate::ui::{UiElementId, UiLayout};
use crate::util::rgb;
use super::super::Renderer;
use super::common::*;

impl Renderer {
    pub(crate) fn render_dialogue(&self, dialogue: &DialogueSession, game: &Game, hovered: Option<UiElementId>, layout: &mut UiLayout) {
        let (sw, sh) = (screen_width(), screen_height());

        // Semi-transparent overlay to focus attention
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.0, 0.0, 0.0, 0.45));

        // Responsive width: cap at 620, with 10px margin each side
        let box_width = sw.min(620.0 + 20.0) - 20.0;
        let choice_spacing = 32.0;
        let content_width = box_width - FRAME_THICKNESS * 2.0 - 24.0;

        let lines = self.wrap_text(dialogue.text(), content_width, 16.0);
        let text_height = lines.len().max(2) as f32 * 22.0;
        let choice_area_height = dialogue.choices().len() as f32 * choice_spacing + 30.0;
        let box_height = (60.0 + text_height + choice_area_height).min(sh - 40.0);

        let box_x = ((sw - box_width) / 2.0).floor();
        let box_y = (sh - box_height - 40.0).max(20.0).floor();

        self.draw_panel_frame(box_x, box_y, box_width, box_height);
        self.draw_corner_accents(box_x, box_y, box_width, box_height);

        // ===== SPEAKER NAME TAB =====
        let speaker_text = dialogue.speaker.to_uppercase();
        let speaker_width = self.measure_text_sharp(&speaker_text, 16.0).width + 40.0;
        let speaker_x = box_x + 20.0;
        let speaker_y = box_y - 8.0;
        let speaker_h = 26.0;

        draw_rectangle(speaker_x - 1.0, speaker_y - 1.0, speaker_width + 2.0, speaker_h + 2.0, FRAME_OUTER);
        draw_rectangle(speaker_x, speaker_y, speaker_width, speaker_h, HEADER_BG);
        draw_line(speaker_x + 2.0, speaker_y + 2.0, speaker_x + speaker_width - 2.0, speaker_y + 2.0, 1.0, FRAME_INNER);

        // Colour swatch matching the NPC on the map
        let swatch = game.npcs().get(&dialogue.npc_id).map(|npc| rgb(npc.color)).unwrap_or(GRAY);
        draw_rectangle(speaker_x + 10.0, speaker_y + 8.0, 10.0, 10.0, swatch);
        self.draw_text_sharp(&speaker_text, speaker_x + 28.0, speaker_y + 18.0, 16.0, TEXT_TITLE);

        // ===== DIALOGUE TEXT =====
        let content_x = box_x + FRAME_THICKNESS + 12.0;
        let content_y = box_y + FRAME_THICKNESS + 20.0;
        draw_line(content_x, content_y, content_x + content_width, content_y, 1.0, HEADER_BORDER);

        let mut line_y = content_y + 28.0;
        for line in &lines {
            self.draw_text_sharp(line, content_x, line_y, 16.0, TEXT_NORMAL);
            line_y += 22.0;
        }

        // ===== CHOICES =====
        let choice_start_y = box_y + box_height - 30.0 - dialogue.choices().len() as f32 * choice_spacing;
        for (i, choice) in dialogue.choices().iter().enumerate() {
            let choice_y = choice_start_y + i as f32 * choice_spacing;
            let bounds = Rect::new(content_x - 5.0, choice_y, content_width + 10.0, 26.0);
            layout.add(UiElementId::DialogueChoice(i), bounds);

            let is_hovered = hovered == Some(UiElementId::DialogueChoice(i));
            let (bg_color, border_color) = if is_hovered {
                (SLOT_HOVER_BG, SLOT_HOVER_BORDER)
            } else {
                (SLOT_BG_EMPTY, SLOT_BORDER)
            };
            draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, border_color);
            draw_rectangle(bounds.x + 1.0, bounds.y + 1.0, bounds.w - 2.0, bounds.h - 2.0, bg_color);

            let text_color = if is_hovered { TEXT_TITLE } else { TEXT_NORMAL };
            self.draw_text_sharp(&format!("[{}] {}", i + 1, choice.text), content_x + 4.0, choice_y + 18.0, 16.0, text_color);
        }

        self.draw_text_sharp(
            "Click or press [1-9] to select | [Esc] to close",
            content_x,
            box_y + box_height - FRAME_THICKNESS - 6.0,
            12.0,
            TEXT_DIM,
        );
    }
}
