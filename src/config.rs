use std::{fs, path::{Path, PathBuf}};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{BlogError, Result};

/// Key under which the whole collection is stored
pub const DEFAULT_STORAGE_KEY: &str = "blogger_posts";

/// Name of the key-value file inside the data directory
pub const STORE_FILE_NAME: &str = "local_storage.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the key-value store file
    pub data_dir: PathBuf,

    /// Key the post collection is stored under
    pub storage_key: String,

    /// Insert the sample posts when the collection is empty at startup
    pub seed_on_first_run: bool,

    /// Keep everything in memory instead of writing to `data_dir`
    pub in_memory: bool,

    /// Editor used to write post content
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_on_first_run: true,
            in_memory: false,
            editor_command: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "blogger")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".blogger"))
}

impl Config {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "blogger").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads a configuration file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| BlogError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;

        if config.storage_key.trim().is_empty() {
            return Err(BlogError::ConfigError {
                message: "storage_key must not be empty".to_string(),
            });
        }

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| BlogError::DirectoryError {
                path: parent.to_path_buf(),
            })?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Full path of the key-value store file
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
