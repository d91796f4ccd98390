//! Computer quiz panel

use macroquad::prelude::*;
use treasure_hunt_core::quiz::QuizSession;

use crate::ui::{UiElementId, UiLayout};
use super::super::Renderer;
use super::common::*;

const PANEL_WIDTH: f32 = 520.0;
const OPTION_HEIGHT: f32 = 30.0;
const OPTION_SPACING: f32 = 36.0;

impl Renderer {
    pub(crate) fn render_quiz(&self, quiz: &QuizSession, hovered: Option<UiElementId>, layout: &mut UiLayout) {
        let (sw, sh) = (screen_width(), screen_height());
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.0, 0.0, 0.0, 0.588));

        let Some(question) = quiz.current() else {
            return;
        };

        let panel_width = PANEL_WIDTH.min(sw - 20.0);
        let content_w = panel_width - FRAME_THICKNESS * 2.0 - 24.0;
        let lines = self.wrap_text(&question.question, content_w, 16.0);
        let panel_height = HEADER_HEIGHT + 40.0
            + lines.len() as f32 * 20.0
            + question.options.len() as f32 * OPTION_SPACING
            + FOOTER_HEIGHT;
        let panel_x = ((sw - panel_width) / 2.0).floor();
        let panel_y = ((sh - panel_height) / 2.0).floor();

        let (position, total) = quiz.position();
        let title = format!("COMPANY QUIZ  {}/{}", position, total);
        let score = format!("Score {}", quiz.score());
        let mut y = self.draw_titled_panel(panel_x, panel_y, panel_width, panel_height, &title, &score);

        let content_x = panel_x + FRAME_THICKNESS + 12.0;
        y += 16.0;
        for line in &lines {
            self.draw_text_sharp(line, content_x, y, 16.0, TEXT_NORMAL);
            y += 20.0;
        }
        y += 4.0;

        for (i, option) in question.options.iter().enumerate() {
            let bounds = Rect::new(content_x, y, content_w, OPTION_HEIGHT);
            layout.add(UiElementId::QuizOption(i), bounds);

            let is_hovered = hovered == Some(UiElementId::QuizOption(i));
            self.draw_button(bounds, &format!("{}. {}", i + 1, option), is_hovered);
            y += OPTION_SPACING;
        }

        // Footer
        let footer_y = panel_y + panel_height - FRAME_THICKNESS - FOOTER_HEIGHT;
        draw_rectangle(panel_x + FRAME_THICKNESS, footer_y, panel_width - FRAME_THICKNESS * 2.0, FOOTER_HEIGHT, FOOTER_BG);
        let hint = format!("{} correct answers unlock the computer | [Esc] give up", quiz.pass_mark());
        self.draw_text_sharp(&hint, content_x, footer_y + 20.0, 12.0, TEXT_DIM);
    }
}
