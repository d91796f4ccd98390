// Window setup and the per-frame loop body

use macroquad::prelude::*;
use treasure_hunt_core::{Game, GameConfig, GameMode};

use crate::input::InputHandler;
use crate::render::Renderer;
use crate::storage;
use crate::ui::UiLayout;

/// Longest step fed to the game, so a stalled tab doesn't teleport the player
const MAX_FRAME_TIME: f32 = 0.1;

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Anniversary Treasure Hunt".to_string(),
        window_width: 1280,
        window_height: 720,
        fullscreen: false,
        platform: macroquad::miniquad::conf::Platform {
            swap_interval: Some(1),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub struct App {
    game: Game,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Clickable elements drawn last frame
    layout: UiLayout,
    debug_mode: bool,
}

impl App {
    pub async fn new(config: GameConfig) -> Result<Self, String> {
        let debug_mode = config.debug;
        let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
        let game = Game::new(config, storage::open_storage(), seed)?;
        let renderer = Renderer::new().await;

        Ok(Self {
            game,
            renderer,
            input_handler: InputHandler::new(),
            layout: UiLayout::new(),
            debug_mode,
        })
    }

    pub fn frame(&mut self) {
        let frame_start = get_time();
        let delta = get_frame_time().min(MAX_FRAME_TIME);

        clear_background(Color::from_rgba(18, 18, 24, 255));
        self.game.set_viewport(screen_width(), screen_height());

        // 1. Input, hit-tested against last frame's layout
        if is_key_pressed(KeyCode::F3) {
            self.debug_mode = !self.debug_mode;
        }
        let mode_before = self.game.mode();
        for command in self.input_handler.process(mode_before, &self.layout) {
            log::debug!("Command: {:?}", command);
            self.game.handle(command);
        }
        if self.game.mode() != mode_before {
            log::debug!("Mode {:?} -> {:?}", mode_before, self.game.mode());
        }

        // 2. Update game state
        let update_start = get_time();
        self.game.update(delta);
        let update_ms = (get_time() - update_start) * 1000.0;

        // 3. Render
        let render_start = get_time();
        self.layout = self.renderer.render(&self.game, self.input_handler.hovered());
        let render_ms = (get_time() - render_start) * 1000.0;

        // 4. Debug info
        if self.debug_mode {
            self.render_debug(update_ms, render_ms, (get_time() - frame_start) * 1000.0);
        }
    }

    fn render_debug(&self, update_ms: f64, render_ms: f64, total_ms: f64) {
        let renderer = &self.renderer;
        let timing_color = Color::from_rgba(100, 255, 150, 255);
        let x = 10.0;
        let mut y = screen_height() - 150.0;
        let mut line = |text: String, color: Color| {
            renderer.draw_text_sharp(&text, x, y, 16.0, color);
            y += 18.0;
        };

        line(format!("FPS: {} [F3]", get_fps()), WHITE);
        line(format!("Mode: {:?}", self.game.mode()), WHITE);
        if self.game.mode() != GameMode::Title {
            let player = self.game.player();
            line(format!("Map: {}  Pos: ({}, {}) facing {:?}", self.game.current_map().id, player.x, player.y, player.facing), YELLOW);
            let camera = self.game.camera();
            line(format!("Camera: ({:.0}, {:.0})", camera.x, camera.y), YELLOW);
        }
        line(format!("Update: {:.2}ms  Render: {:.2}ms  Total: {:.2}ms", update_ms, render_ms, total_ms), timing_color);
        line(format!("UI elements: {}", self.layout.elements.len()), timing_color);
    }
}
