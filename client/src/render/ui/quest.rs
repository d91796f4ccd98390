//! Quest UI rendering (quest log, tracker)

use macroquad::prelude::*;
use treasure_hunt_core::quest::{GuideStep, QuestPhase};
use treasure_hunt_core::Game;

use crate::ui::{UiElementId, UiLayout};
use super::super::Renderer;
use super::common::*;

fn phase_label(phase: QuestPhase) -> (&'static str, Color) {
    match phase {
        QuestPhase::Locked => ("Locked", TEXT_DIM),
        QuestPhase::Available => ("New", TEXT_GOLD),
        QuestPhase::Collecting => ("In progress", TEXT_NORMAL),
        QuestPhase::ReadyToSubmit => ("Ready", TEXT_SUCCESS),
        QuestPhase::Completed => ("Done", TEXT_SUCCESS),
    }
}

impl Renderer {
    pub(crate) fn render_quest_log(&self, game: &Game, hovered: Option<UiElementId>, layout: &mut UiLayout) {
        let (sw, sh) = (screen_width(), screen_height());

        let panel_width = 440.0_f32.min(sw - 20.0);
        let panel_height = 460.0_f32.min(sh - 20.0);
        let panel_x = ((sw - panel_width) / 2.0).floor();
        let panel_y = ((sh - panel_height) / 2.0).floor();

        // Semi-transparent overlay
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.0, 0.0, 0.0, 0.588));

        let quests = game.quests();
        let log = quests.log();
        let title = format!("QUEST LOG  {}/{}", log.completed_count(), log.quests.len());
        let content_y = self.draw_titled_panel(panel_x, panel_y, panel_width, panel_height, &title, "[Q] Close");

        // ===== CONTENT AREA =====
        let content_x = panel_x + FRAME_THICKNESS + 8.0;
        let content_w = panel_width - FRAME_THICKNESS * 2.0 - 16.0;
        let content_h = panel_y + panel_height - FRAME_THICKNESS - 8.0 - content_y;

        // Quest list panel with inset effect
        draw_rectangle(content_x, content_y, content_w, content_h, SLOT_BORDER);
        draw_rectangle(content_x + 1.0, content_y + 1.0, content_w - 2.0, content_h - 2.0, SLOT_BG_EMPTY);
        draw_line(content_x + 2.0, content_y + 2.0, content_x + content_w - 2.0, content_y + 2.0, 2.0, SLOT_INNER_SHADOW);
        draw_line(content_x + 2.0, content_y + 2.0, content_x + 2.0, content_y + content_h - 2.0, 2.0, SLOT_INNER_SHADOW);

        let guides = quests.active_guides(game.state());
        let current = quests.current_quest().map(|q| q.id);
        let bottom = content_y + content_h - 8.0;
        let mut y = content_y + 10.0;

        for (index, quest) in quests.manager().registry().all().iter().enumerate() {
            if y + 20.0 > bottom {
                break;
            }

            let phase = quests.phase(quest.id);
            let entry_top = y;
            let is_current = current == Some(quest.id);

            // Title row
            let (label, label_color) = phase_label(phase);
            let title_color = match phase {
                QuestPhase::Locked => TEXT_DIM,
                QuestPhase::Completed => TEXT_DIM,
                _ if is_current => TEXT_TITLE,
                _ => TEXT_NORMAL,
            };
            let title = if phase == QuestPhase::Locked { "???" } else { quest.title.as_str() };
            self.draw_text_sharp(title, content_x + 12.0, y + 14.0, 16.0, title_color);
            let label_w = self.measure_text_sharp(label, 12.0).width;
            self.draw_text_sharp(label, content_x + content_w - label_w - 12.0, y + 14.0, 12.0, label_color);
            y += 20.0;

            // Details for quests being worked on
            if let Some(guide) = guides.iter().find(|g| g.quest_id == quest.id) {
                let giver = game.npcs().name(&quest.quest_giver);
                self.draw_text_sharp(&format!("From {}", giver), content_x + 20.0, y + 12.0, 12.0, TEXT_DIM);
                y += 16.0;

                if let GuideStep::Collect { items, .. } = &guide.step {
                    for item in items {
                        let check = if item.held { "[x]" } else { "[ ]" };
                        let color = if item.held { TEXT_SUCCESS } else { TEXT_NORMAL };
                        let text = format!("{} {}", check, game.items().display_name(&item.name));
                        self.draw_text_sharp(&text, content_x + 20.0, y + 12.0, 12.0, color);
                        y += 16.0;
                    }
                }

                // Progress bar
                if let Some(progress) = log.get(quest.id) {
                    let bar_w = content_w - 40.0;
                    draw_rectangle(content_x + 20.0, y + 4.0, bar_w, 6.0, SLOT_INNER_SHADOW);
                    draw_rectangle(content_x + 20.0, y + 4.0, bar_w * progress.progress_percent(), 6.0, FRAME_ACCENT);
                    y += 14.0;
                }
            }

            layout.add(UiElementId::QuestLogEntry(index), Rect::new(content_x + 4.0, entry_top, content_w - 8.0, y - entry_top));
            if hovered == Some(UiElementId::QuestLogEntry(index)) && phase != QuestPhase::Locked {
                draw_rectangle_lines(content_x + 4.0, entry_top, content_w - 8.0, y - entry_top, 1.0, SLOT_HOVER_BORDER);
            }

            y += 8.0;
        }

        if log.quests.is_empty() {
            self.draw_text_sharp("No quests today.", content_x + 12.0, content_y + 24.0, 16.0, TEXT_DIM);
        }
    }

    /// Render the quest objective tracker (top-left corner)
    pub(crate) fn render_quest_tracker(&self, game: &Game, top: f32) {
        let Some(guide_text) = game.guide_text() else {
            return;
        };

        let tracker_x = 10.0;
        let mut y = top;

        if let Some(quest) = game.quests().current_quest() {
            if !game.quests().all_completed() {
                self.draw_text_sharp(&quest.title, tracker_x, y, 16.0, Color::from_rgba(255, 220, 100, 255));
                y += 18.0;
            }
        }
        self.draw_text_sharp(&guide_text, tracker_x + 10.0, y, 16.0, WHITE);
    }
}
