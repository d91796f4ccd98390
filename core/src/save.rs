//! Save games
//!
//! One JSON document under a single storage key. Fields are read one by one
//! so a damaged field only loses that part of the save.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::player::Player;
use crate::quest::QuestLog;
use crate::state::GameState;

pub use crate::config::SAVE_KEY;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage quota exceeded ({size} bytes for '{key}')")]
    QuotaExceeded { key: String, size: usize },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Key/value storage for saves: browser local storage, files, or memory in tests
pub trait SaveStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
    fn remove(&mut self, key: &str) -> Result<(), SaveError>;
}

/// In-memory storage with an optional size limit per value
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }
}

impl SaveStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(SaveError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                });
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.values.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        let file: String = key.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl SaveStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Everything written to storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub map_id: String,
    pub player: Option<Player>,
    pub game_state: GameState,
    pub quest_state: QuestLog,
}

impl SaveData {
    pub fn new(map_id: &str, player: &Player, game_state: &GameState, quest_state: &QuestLog) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis(),
            map_id: map_id.to_string(),
            player: Some(player.clone()),
            game_state: game_state.clone(),
            quest_state: quest_state.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a save, tolerating damaged fields.
    /// Returns `None` when the document isn't a JSON object at all.
    pub fn from_json(json: &str) -> Option<Self> {
        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring unreadable save: {}", e);
                return None;
            }
        };
        let Value::Object(fields) = value else {
            warn!("Ignoring save that is not a JSON object");
            return None;
        };

        Some(Self {
            timestamp: field(&fields, "timestamp").unwrap_or_default(),
            map_id: field(&fields, "mapId").unwrap_or_default(),
            player: field(&fields, "player"),
            game_state: field(&fields, "gameState").unwrap_or_default(),
            quest_state: field(&fields, "questState").unwrap_or_default(),
        })
    }
}

fn field<T: DeserializeOwned>(fields: &serde_json::Map<String, Value>, name: &str) -> Option<T> {
    let value = fields.get(name)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Save field '{}' is damaged, using default: {}", name, e);
            None
        }
    }
}

/// Write a save under `key`
pub fn save_game(storage: &mut dyn SaveStorage, key: &str, data: &SaveData) -> Result<(), SaveError> {
    let json = data.to_json()?;
    storage.set(key, &json)?;
    info!("Game saved ({} bytes)", json.len());
    Ok(())
}

/// Read the save under `key`. Storage errors and unreadable saves count as no save.
pub fn load_game(storage: &dyn SaveStorage, key: &str) -> Option<SaveData> {
    match storage.get(key) {
        Ok(Some(json)) => SaveData::from_json(&json),
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to read save: {}", e);
            None
        }
    }
}

pub fn has_save(storage: &dyn SaveStorage, key: &str) -> bool {
    matches!(storage.get(key), Ok(Some(_)))
}

pub fn delete_save(storage: &mut dyn SaveStorage, key: &str) -> Result<(), SaveError> {
    storage.remove(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ItemRegistry;
    use crate::quest::{QuestManager, QuestRegistry};

    fn sample() -> SaveData {
        let items = ItemRegistry::builtin().unwrap();
        let mut state = GameState::new();
        state.visit_map("lobby");
        state.visit_map("office");
        state.collect_item(Some("lobby_badge"), items.make_inventory_item("visitor_badge"));
        state.collect_item(Some("lobby_coin"), items.make_inventory_item("coin"));
        state.mark_quest_completed(1);

        let manager = QuestManager::new(QuestRegistry::builtin().unwrap());
        SaveData::new("office", &Player::new(3, 4), &state, manager.log())
    }

    /// Equal apart from the player's visual position, which is never saved
    fn assert_same(a: &SaveData, b: &SaveData) {
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.map_id, b.map_id);
        assert_eq!(
            a.player.as_ref().map(|p| (p.x, p.y, p.facing)),
            b.player.as_ref().map(|p| (p.x, p.y, p.facing))
        );
        assert_eq!(a.game_state, b.game_state);
        assert_eq!(a.quest_state, b.quest_state);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let data = sample();
        save_game(&mut storage, SAVE_KEY, &data).unwrap();

        let loaded = load_game(&storage, SAVE_KEY).unwrap();
        assert_eq!(loaded.game_state.items_collected, data.game_state.items_collected);
        assert_eq!(loaded.game_state.visited_maps, data.game_state.visited_maps);
        assert_eq!(loaded.game_state.completed_quests, data.game_state.completed_quests);
        assert_same(&loaded, &data);
    }

    #[test]
    fn test_uses_camel_case_keys() {
        let json = sample().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        for key in ["timestamp", "mapId", "player", "gameState", "questState"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value["gameState"].get("itemsCollected").is_some());
        assert!(value["gameState"]["inventory"][0].get("type").is_some());
    }

    #[test]
    fn test_damaged_fields_fall_back() {
        let json = r#"{
            "timestamp": "yesterday",
            "mapId": "office",
            "player": {"x": "left"},
            "gameState": {"itemsCollected": 4, "visitedMaps": ["lobby"]},
            "questState": 12
        }"#;
        let loaded = SaveData::from_json(json).unwrap();
        assert_eq!(loaded.timestamp, 0);
        assert_eq!(loaded.map_id, "office");
        assert_eq!(loaded.player, None);
        assert_eq!(loaded.game_state.items_collected, 4);
        assert!(loaded.game_state.completed_quests.is_empty());
        assert_eq!(loaded.quest_state, QuestLog::default());
    }

    #[test]
    fn test_garbage_is_no_save() {
        assert!(SaveData::from_json("not json").is_none());
        assert!(SaveData::from_json("[1, 2]").is_none());

        let mut storage = MemoryStorage::new();
        storage.set(SAVE_KEY, "{{{").unwrap();
        assert!(load_game(&storage, SAVE_KEY).is_none());
        assert!(has_save(&storage, SAVE_KEY));
    }

    #[test]
    fn test_quota_exceeded() {
        let mut storage = MemoryStorage::with_quota(16);
        let err = save_game(&mut storage, SAVE_KEY, &sample()).unwrap_err();
        assert!(matches!(err, SaveError::QuotaExceeded { .. }));
        assert!(!has_save(&storage, SAVE_KEY));
    }

    #[test]
    fn test_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("saves"));
        assert!(load_game(&storage, SAVE_KEY).is_none());

        let data = sample();
        save_game(&mut storage, SAVE_KEY, &data).unwrap();
        assert!(dir.path().join("saves").join("treasureHuntGame.json").exists());
        assert_same(&load_game(&storage, SAVE_KEY).unwrap(), &data);

        delete_save(&mut storage, SAVE_KEY).unwrap();
        assert!(!has_save(&storage, SAVE_KEY));
        // Deleting twice is fine
        delete_save(&mut storage, SAVE_KEY).unwrap();
    }
}
