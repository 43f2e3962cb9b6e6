use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, StudioError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub history: HistorySettings,
    pub conversation: ConversationSettings,
    pub spell: SpellSettings,
    /// Overrides the default `~/.veloxmind` data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    pub max_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSettings {
    pub max_turns: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellSettings {
    pub enabled: bool,
    pub max_suggestions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history: HistorySettings { max_entries: 100 },
            conversation: ConversationSettings { max_turns: 50 },
            spell: SpellSettings {
                enabled: true,
                max_suggestions: 5,
            },
            data_dir: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("veloxmind")
            .join("config.toml")
    }

    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| StudioError::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Resolve the data directory holding the history and conversation
    /// files, creating it if absent.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => {
                let home = dirs::home_dir().ok_or_else(|| {
                    StudioError::Config("Could not determine home directory".to_string())
                })?;
                home.join(".veloxmind")
            }
        };

        std::fs::create_dir_all(&dir).map_err(|e| {
            StudioError::Config(format!("Failed to create data directory: {}", e))
        })?;

        Ok(dir)
    }

    pub fn history_file(&self) -> Result<PathBuf> {
        Ok(self.resolve_data_dir()?.join("history.json"))
    }

    pub fn conversation_file(&self) -> Result<PathBuf> {
        Ok(self.resolve_data_dir()?.join("conversation.json"))
    }
}
