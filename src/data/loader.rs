//! RON configuration loader
//!
//! Loads game settings from an external RON file, with fallback to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entities::player::Sex;
use crate::items::item::ItemCategory;
use crate::progression::difficulty::Difficulty;
use crate::save::SaveError;

/// Default location of the configuration file
pub const CONFIG_FILE: &str = "delver.ron";

/// Settings for a new game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_name: String,
    pub sex: Sex,
    pub difficulty: Difficulty,
    /// Intercept deaths and keep playing
    pub wizard_mode: bool,
    /// Fixed seed for reproducible games
    pub seed: Option<u64>,
    /// Item categories picked up automatically
    pub auto_pickup: Vec<ItemCategory>,
    /// Where memorial files are written
    pub memorial_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: "Adventurer".to_string(),
            sex: Sex::default(),
            difficulty: Difficulty::default(),
            wizard_mode: false,
            seed: None,
            auto_pickup: vec![ItemCategory::Gold, ItemCategory::Gem],
            memorial_dir: None,
        }
    }
}

impl GameConfig {
    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_ron_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_ron_str(content: &str) -> Result<Self, SaveError> {
        Ok(ron::from_str(content)?)
    }

    pub fn to_ron_string(&self) -> Result<String, SaveError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Write the default configuration as an editable template
    pub fn export_default(path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, Self::default().to_ron_string()?)?;
        log::info!("Exported default config to {}", path.display());
        Ok(())
    }
}
