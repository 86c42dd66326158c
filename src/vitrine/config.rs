use crate::error::{Result, VitrineError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "catalogItems.json";

/// Kiosk configuration, stored in `<config dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct VitrineConfig {
    /// Catalog file; relative paths are resolved against the config directory.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Material options offered by the material filter.
    #[serde(default = "default_materials")]
    pub materials: Vec<String>,

    /// Maximum age of a cached catalog snapshot, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_max_age_secs: Option<u64>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_materials() -> Vec<String> {
    vec![
        "Bronze".to_string(),
        "Granite".to_string(),
        "Marble".to_string(),
        "Stone".to_string(),
    ]
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            materials: default_materials(),
            cache_max_age_secs: None,
        }
    }
}

/// Keys accepted by `vitrine config`.
pub const CONFIG_KEYS: [&str; 3] = ["data-file", "materials", "cache-max-age-secs"];

impl VitrineConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VitrineError::Io)?;
        let config: VitrineConfig =
            serde_json::from_str(&content).map_err(VitrineError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VitrineError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VitrineError::Serialization)?;
        fs::write(config_path, content).map_err(VitrineError::Io)?;
        Ok(())
    }

    /// The catalog path, anchored at `config_dir` when relative.
    pub fn data_path(&self, config_dir: &Path) -> PathBuf {
        if self.data_file.is_absolute() {
            self.data_file.clone()
        } else {
            config_dir.join(&self.data_file)
        }
    }

    pub fn cache_max_age(&self) -> Option<Duration> {
        self.cache_max_age_secs.map(Duration::from_secs)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "data-file" => Ok(self.data_file.display().to_string()),
            "materials" => Ok(self.materials.join(", ")),
            "cache-max-age-secs" => Ok(self
                .cache_max_age_secs
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string())),
            other => Err(unknown_key(other)),
        }
    }

    /// Sets a key from its textual form. Materials are comma-separated;
    /// `none` clears the cache age.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => self.data_file = PathBuf::from(value),
            "materials" => {
                self.materials = value
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect()
            }
            "cache-max-age-secs" => {
                self.cache_max_age_secs = match value.trim() {
                    "none" | "" => None,
                    secs => Some(secs.parse().map_err(|_| {
                        VitrineError::Config(format!("Invalid number of seconds: {}", secs))
                    })?),
                }
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> VitrineError {
    VitrineError::Config(format!(
        "Unknown config key: {} (known: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
