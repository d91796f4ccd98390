//! Game configuration. Every field has a default, so a partial (or missing)
//! config file still yields a playable game.

use serde::{Deserialize, Serialize};

/// Storage key of the save game
pub const SAVE_KEY: &str = "treasureHuntGame";
/// Storage key of the config on platforms without a filesystem
pub const CONFIG_KEY: &str = "treasureHuntConfig";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Size of one tile on screen, in pixels
    pub tile_size: f32,
    /// Seconds between steps while a direction is held
    pub move_interval_secs: f32,
    /// How long notifications stay on screen
    pub notification_secs: f32,
    /// Seconds between autosaves, 0 disables
    pub autosave_secs: f32,
    pub save_key: String,
    /// Probability (0..=1) that a print job jams
    pub printer_jam_chance: f64,
    /// Questions asked per computer session
    pub quiz_questions: usize,
    /// Correct answers needed to earn the access code
    pub quiz_pass_mark: usize,
    pub vending_cooldown_secs: f32,
    pub printer_cooldown_secs: f32,
    pub computer_cooldown_secs: f32,
    /// Default log filter when RUST_LOG is not set
    pub log_filter: String,
    /// Show the debug overlay
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            move_interval_secs: 0.16,
            notification_secs: 3.0,
            autosave_secs: 30.0,
            save_key: SAVE_KEY.to_string(),
            printer_jam_chance: 0.25,
            quiz_questions: 3,
            quiz_pass_mark: 2,
            vending_cooldown_secs: 2.0,
            printer_cooldown_secs: 5.0,
            computer_cooldown_secs: 10.0,
            log_filter: "info".to_string(),
            debug: false,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        Ok(config.sanitized())
    }

    pub fn to_toml_string(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to write config: {}", e))
    }

    /// Pull out-of-range values back into something playable
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.tile_size > 0.0) {
            self.tile_size = defaults.tile_size;
        }
        if !(self.move_interval_secs > 0.0) {
            self.move_interval_secs = defaults.move_interval_secs;
        }
        self.autosave_secs = self.autosave_secs.max(0.0);
        self.printer_jam_chance = if self.printer_jam_chance.is_nan() {
            defaults.printer_jam_chance
        } else {
            self.printer_jam_chance.clamp(0.0, 1.0)
        };
        if !(self.notification_secs > 0.0) {
            self.notification_secs = defaults.notification_secs;
        }
        self.quiz_questions = self.quiz_questions.max(1);
        self.quiz_pass_mark = self.quiz_pass_mark.clamp(1, self.quiz_questions);
        if self.save_key.is_empty() {
            self.save_key = defaults.save_key;
        }
        self
    }
}
