use macroquad::prelude::*;
use treasure_hunt_core::data::ItemCategory;
use treasure_hunt_core::map::{ObjectKind, Tile};
use treasure_hunt_core::quest::QuestMarker;
use treasure_hunt_core::{Camera, Game, GameMode, Player};

use crate::ui::{UiElementId, UiLayout};
use crate::util::{rgb, wrap_words};
use super::font::BitmapFont;
use super::ui::common::*;

const FONT_PATH: &str = "assets/fonts/monogram.ttf";

/// Flat colour of a tile before any detail is drawn on top
pub fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Wall => Color::from_rgba(62, 64, 78, 255),
        Tile::Floor | Tile::Plant => Color::from_rgba(198, 188, 166, 255),
        Tile::Carpet => Color::from_rgba(124, 62, 66, 255),
        Tile::Desk => Color::from_rgba(142, 102, 62, 255),
        Tile::Window => Color::from_rgba(150, 200, 232, 255),
        Tile::ServerRack => Color::from_rgba(38, 42, 50, 255),
        Tile::Counter => Color::from_rgba(172, 142, 102, 255),
        Tile::Door => Color::from_rgba(112, 82, 52, 255),
    }
}

pub fn category_color(category: ItemCategory) -> Color {
    match category {
        ItemCategory::Quest => CATEGORY_QUEST,
        ItemCategory::Key => CATEGORY_KEY,
        ItemCategory::Consumable => CATEGORY_CONSUMABLE,
        ItemCategory::Document => CATEGORY_DOCUMENT,
        ItemCategory::Collectible => CATEGORY_COLLECTIBLE,
    }
}

/// Something standing on the map, drawn back to front
enum Renderable<'a> {
    Npc { id: &'a str, x: i32, y: i32 },
    Player(&'a Player),
}

pub struct Renderer {
    player_color: Color,
    /// Multi-size pixel font for sharp text rendering at various sizes
    font: BitmapFont,
}

impl Renderer {
    pub async fn new() -> Self {
        let font = BitmapFont::load_or_default(FONT_PATH).await;
        if font.is_loaded() {
            log::info!("Loaded pixel font at multiple sizes");
        } else {
            log::warn!("Pixel font missing, using default font");
        }

        Self {
            player_color: Color::from_rgba(100, 255, 150, 255),
            font,
        }
    }

    /// Draw text with pixel font for sharp rendering
    pub fn draw_text_sharp(&self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        self.font.draw_text(text, x, y, font_size, color);
    }

    pub(crate) fn measure_text_sharp(&self, text: &str, font_size: f32) -> TextDimensions {
        self.font.measure_text(text, font_size)
    }

    pub(crate) fn wrap_text(&self, text: &str, max_width: f32, font_size: f32) -> Vec<String> {
        wrap_words(text, max_width, |line| self.measure_text_sharp(line, font_size).width)
    }

    /// Draw text with word wrapping to fit within max_width.
    /// Returns the total height used.
    pub(crate) fn draw_text_wrapped(&self, text: &str, x: f32, y: f32, font_size: f32, color: Color, max_width: f32, line_height: f32) -> f32 {
        let lines = self.wrap_text(text, max_width, font_size);
        for (i, line) in lines.iter().enumerate() {
            self.draw_text_sharp(line, x, y + i as f32 * line_height, font_size, color);
        }
        lines.len() as f32 * line_height
    }

    /// Draw the whole frame and return what can be clicked
    pub fn render(&self, game: &Game, hovered: Option<UiElementId>) -> UiLayout {
        let mut layout = UiLayout::new();

        if game.mode() == GameMode::Title {
            self.render_title(game, hovered, &mut layout);
            self.render_notifications(game);
            return layout;
        }

        // 1. World
        self.render_map(game);
        self.render_entities(game);

        // 2. HUD
        self.render_hud(game);

        // 3. Mode panel on top
        match game.mode() {
            GameMode::Dialogue => {
                if let Some(dialogue) = game.dialogue() {
                    self.render_dialogue(dialogue, game, hovered, &mut layout);
                }
            }
            GameMode::Quiz => {
                if let Some(quiz) = game.quiz() {
                    self.render_quiz(quiz, hovered, &mut layout);
                }
            }
            GameMode::Inventory => self.render_inventory(game, hovered, &mut layout),
            GameMode::QuestLog => self.render_quest_log(game, hovered, &mut layout),
            GameMode::Victory => self.render_victory(game, hovered, &mut layout),
            GameMode::Title | GameMode::Playing => {}
        }

        self.render_notifications(game);
        layout
    }

    // ========================================================================
    // World
    // ========================================================================

    fn render_map(&self, game: &Game) {
        let map = game.current_map();
        let camera = game.camera();
        let ts = game.config().tile_size;

        let (min_x, min_y, max_x, max_y) = camera.visible_tile_range(map.width, map.height, ts);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if let Some(tile) = map.tile(x, y) {
                    let (sx, sy) = camera.world_to_screen(x as f32 * ts, y as f32 * ts);
                    self.draw_tile(tile, sx, sy, ts);
                }
            }
        }

        // Locked doors get a padlock
        for door in &map.doors {
            if map.door_lock(door, game.state()).is_some() {
                let (sx, sy) = camera.world_to_screen(door.x as f32 * ts, door.y as f32 * ts);
                let w = ts * 0.35;
                let lx = sx + (ts - w) / 2.0;
                let ly = sy + ts * 0.45;
                draw_circle_lines(lx + w / 2.0, ly, w * 0.35, 2.0, Color::from_rgba(220, 220, 230, 255));
                draw_rectangle(lx, ly, w, w * 0.8, Color::from_rgba(200, 60, 60, 255));
            }
        }

        // Machines
        for object in &map.objects {
            let (sx, sy) = camera.world_to_screen(object.x as f32 * ts, object.y as f32 * ts);
            self.draw_machine(object.kind, sx, sy, ts);

            if let Some(status) = game.minigames().get(object.kind).status() {
                let w = self.measure_text_sharp(&status, 16.0).width;
                self.draw_text_sharp(&status, sx + (ts - w) / 2.0, sy - 6.0, 16.0, YELLOW);
            }
        }

        // Items lying around, bobbing slightly
        let bob = (get_time() * 3.0).sin() as f32 * ts * 0.06;
        for item in map.visible_items(game.state()) {
            let (sx, sy) = camera.world_to_screen(item.x as f32 * ts, item.y as f32 * ts);
            let color = game.items()
                .get(&item.item)
                .map(|def| category_color(def.category))
                .unwrap_or(WHITE);

            let cx = sx + ts / 2.0;
            let cy = sy + ts / 2.0 + bob;
            let r = ts * 0.22;
            draw_circle(cx, sy + ts * 0.78, r * 0.8, Color::new(0.0, 0.0, 0.0, 0.2));
            draw_poly(cx, cy, 4, r, 45.0, color);
            draw_poly_lines(cx, cy, 4, r, 45.0, 1.5, Color::from_rgba(60, 50, 30, 255));
        }
    }

    fn draw_tile(&self, tile: Tile, x: f32, y: f32, ts: f32) {
        draw_rectangle(x, y, ts, ts, tile_color(tile));

        match tile {
            Tile::Floor => {
                draw_rectangle_lines(x, y, ts, ts, 1.0, Color::from_rgba(184, 174, 152, 255));
            }
            Tile::Wall => {
                draw_rectangle(x, y + ts * 0.75, ts, ts * 0.25, Color::from_rgba(46, 48, 60, 255));
            }
            Tile::Desk => {
                draw_rectangle(x + 2.0, y + 2.0, ts - 4.0, ts * 0.2, Color::from_rgba(168, 126, 80, 255));
                // Monitor
                draw_rectangle(x + ts * 0.3, y + ts * 0.3, ts * 0.4, ts * 0.3, Color::from_rgba(30, 34, 44, 255));
                draw_rectangle(x + ts * 0.34, y + ts * 0.34, ts * 0.32, ts * 0.2, Color::from_rgba(90, 150, 200, 255));
            }
            Tile::Plant => {
                draw_rectangle(x + ts * 0.35, y + ts * 0.6, ts * 0.3, ts * 0.3, Color::from_rgba(150, 80, 50, 255));
                draw_circle(x + ts / 2.0, y + ts * 0.45, ts * 0.28, Color::from_rgba(60, 140, 70, 255));
            }
            Tile::Window => {
                draw_rectangle_lines(x, y, ts, ts, 2.0, Color::from_rgba(90, 92, 104, 255));
                draw_line(x + ts / 2.0, y, x + ts / 2.0, y + ts, 1.0, Color::from_rgba(90, 92, 104, 255));
            }
            Tile::ServerRack => {
                let blink = (get_time() * 4.0 + (x + y) as f64 * 0.1).sin() > 0.0;
                for i in 0..3 {
                    let ly = y + ts * (0.2 + i as f32 * 0.25);
                    draw_rectangle(x + ts * 0.15, ly, ts * 0.7, ts * 0.12, Color::from_rgba(58, 62, 72, 255));
                    let led = if blink == (i % 2 == 0) { GREEN } else { DARKGREEN };
                    draw_rectangle(x + ts * 0.72, ly + 2.0, 3.0, 3.0, led);
                }
            }
            Tile::Counter => {
                draw_rectangle(x, y, ts, ts * 0.25, Color::from_rgba(196, 170, 130, 255));
            }
            Tile::Door => {
                draw_rectangle_lines(x + 2.0, y + 2.0, ts - 4.0, ts - 4.0, 2.0, Color::from_rgba(70, 50, 30, 255));
                draw_circle(x + ts * 0.75, y + ts / 2.0, ts * 0.06, GOLD);
            }
            Tile::Carpet => {}
        }
    }

    fn draw_machine(&self, kind: ObjectKind, x: f32, y: f32, ts: f32) {
        let (body, accent, label) = match kind {
            ObjectKind::Vending => (Color::from_rgba(180, 40, 50, 255), Color::from_rgba(240, 220, 120, 255), "V"),
            ObjectKind::Printer => (Color::from_rgba(200, 200, 208, 255), Color::from_rgba(80, 80, 90, 255), "P"),
            ObjectKind::Computer => (Color::from_rgba(50, 56, 70, 255), Color::from_rgba(80, 200, 255, 255), "C"),
        };

        draw_rectangle(x + 2.0, y + 2.0, ts - 4.0, ts - 4.0, body);
        draw_rectangle_lines(x + 2.0, y + 2.0, ts - 4.0, ts - 4.0, 1.0, BLACK);
        draw_rectangle(x + ts * 0.2, y + ts * 0.18, ts * 0.6, ts * 0.3, accent);
        let w = self.measure_text_sharp(label, 16.0).width;
        self.draw_text_sharp(label, x + (ts - w) / 2.0, y + ts * 0.85, 16.0, BLACK);
    }

    fn render_entities(&self, game: &Game) {
        let map = game.current_map();
        let player = game.player();

        let mut renderables: Vec<(f32, Renderable)> = map.npcs.iter()
            .map(|npc| (npc.y as f32, Renderable::Npc { id: &npc.id, x: npc.x, y: npc.y }))
            .collect();
        renderables.push((player.visual_y, Renderable::Player(player)));

        // Sort by row (painter's algorithm)
        renderables.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, renderable) in renderables {
            match renderable {
                Renderable::Npc { id, x, y } => self.render_npc(game, id, x, y),
                Renderable::Player(player) => self.render_player(player, game.camera(), game.config().tile_size),
            }
        }
    }

    fn draw_person(&self, x: f32, y: f32, ts: f32, color: Color) {
        // Shadow
        draw_ellipse(x + ts / 2.0, y + ts * 0.9, ts * 0.3, ts * 0.1, 0.0, Color::new(0.0, 0.0, 0.0, 0.25));
        // Body
        draw_rectangle(x + ts * 0.25, y + ts * 0.42, ts * 0.5, ts * 0.46, color);
        draw_rectangle_lines(x + ts * 0.25, y + ts * 0.42, ts * 0.5, ts * 0.46, 1.0, Color::from_rgba(30, 30, 40, 255));
        // Head
        draw_circle(x + ts / 2.0, y + ts * 0.28, ts * 0.18, Color::from_rgba(240, 205, 170, 255));
    }

    fn render_npc(&self, game: &Game, npc_id: &str, x: i32, y: i32) {
        let ts = game.config().tile_size;
        let (sx, sy) = game.camera().world_to_screen(x as f32 * ts, y as f32 * ts);

        let color = game.npcs().get(npc_id).map(|def| rgb(def.color)).unwrap_or(GRAY);
        self.draw_person(sx, sy, ts, color);

        // Name below the feet
        let name = game.npcs().name(npc_id);
        let name_w = self.measure_text_sharp(name, 12.0).width;
        let name_x = sx + (ts - name_w) / 2.0;
        draw_rectangle(name_x - 2.0, sy + ts + 1.0, name_w + 4.0, 12.0, Color::new(0.0, 0.0, 0.0, 0.5));
        self.draw_text_sharp(name, name_x, sy + ts + 11.0, 12.0, WHITE);

        // Quest marker above the head
        if let Some(marker) = game.quests().npc_marker(npc_id) {
            let bob = (get_time() * 4.0).sin() as f32 * 2.0;
            let color = match marker {
                QuestMarker::Available => TEXT_GOLD,
                QuestMarker::ReadyToSubmit => TEXT_SUCCESS,
            };
            let symbol = marker.symbol();
            let w = self.measure_text_sharp(symbol, 24.0).width;
            self.draw_text_sharp(symbol, sx + (ts - w) / 2.0, sy - 2.0 + bob, 24.0, color);
        }
    }

    fn render_player(&self, player: &Player, camera: &Camera, ts: f32) {
        let (sx, sy) = camera.world_to_screen(player.visual_x * ts, player.visual_y * ts);

        // Walking bob
        let bob = if player.is_moving { (player.animation_frame * std::f32::consts::PI).sin().abs() * 2.0 } else { 0.0 };
        self.draw_person(sx, sy - bob, ts, self.player_color);

        // Eyes show where the player is facing
        let (dx, dy) = player.facing.delta();
        let cx = sx + ts / 2.0 + dx as f32 * ts * 0.08;
        let cy = sy - bob + ts * 0.28 + dy as f32 * ts * 0.06;
        if dy >= 0 {
            draw_circle(cx - ts * 0.06, cy, 1.5, BLACK);
            draw_circle(cx + ts * 0.06, cy, 1.5, BLACK);
        }
    }
}
