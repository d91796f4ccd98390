//! Platform storage for saves and config
//!
//! Desktop keeps `config.toml` in the platform config dir and saves as JSON
//! files in the data dir. The browser build keeps both in local storage.

use treasure_hunt_core::{GameConfig, SaveStorage};
#[cfg(target_arch = "wasm32")]
use treasure_hunt_core::SaveError;

#[cfg(not(target_arch = "wasm32"))]
const APP_DIR: &str = "treasure-hunt";

/// Parse a config document, falling back to defaults on any error
pub fn config_from_str(contents: &str) -> GameConfig {
    match GameConfig::from_toml_str(contents) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Invalid config, using defaults: {}", e);
            GameConfig::default()
        }
    }
}

// ============================================================================
// Desktop
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
fn config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> GameConfig {
    let Some(path) = config_path() else {
        return GameConfig::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            log::info!("Loaded config from {}", path.display());
            config_from_str(&contents)
        }
        Err(_) => GameConfig::default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_storage() -> Box<dyn SaveStorage> {
    use treasure_hunt_core::{FileStorage, MemoryStorage};

    match dirs::data_dir() {
        Some(dir) => {
            let dir = dir.join(APP_DIR);
            log::info!("Saving to {}", dir.display());
            Box::new(FileStorage::new(dir))
        }
        None => {
            log::warn!("No data directory on this system, progress will not persist");
            Box::new(MemoryStorage::new())
        }
    }
}

// ============================================================================
// Browser
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub fn load_config() -> GameConfig {
    let stored = quad_storage::STORAGE
        .lock()
        .ok()
        .and_then(|storage| storage.get(treasure_hunt_core::config::CONFIG_KEY));

    match stored {
        Some(contents) => config_from_str(&contents),
        None => GameConfig::default(),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn open_storage() -> Box<dyn SaveStorage> {
    Box::new(LocalStorage)
}

/// `localStorage` through quad-storage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
fn lock_failed(e: impl std::fmt::Display) -> SaveError {
    SaveError::Unavailable(e.to_string())
}

#[cfg(target_arch = "wasm32")]
impl SaveStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        let storage = quad_storage::STORAGE.lock().map_err(lock_failed)?;
        Ok(storage.get(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        let mut storage = quad_storage::STORAGE.lock().map_err(lock_failed)?;
        storage.set(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        let mut storage = quad_storage::STORAGE.lock().map_err(lock_failed)?;
        storage.remove(key);
        Ok(())
    }
}
