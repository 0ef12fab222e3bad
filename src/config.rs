use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_STATS_FILE: &str = "raphina_stats.json";
pub const DEFAULT_EVENTS_FILE: &str = "raphinha_data.json";
pub const DEFAULT_HEAT_FILE: &str = "raphinha_heat.json";
pub const DEFAULT_SHOTS_FILE: &str = "shot.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub stats_file: String,
    pub events_file: String,
    pub heat_file: String,
    pub shots_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            stats_file: DEFAULT_STATS_FILE.to_string(),
            events_file: DEFAULT_EVENTS_FILE.to_string(),
            heat_file: DEFAULT_HEAT_FILE.to_string(),
            shots_file: DEFAULT_SHOTS_FILE.to_string(),
        }
    }
}

impl DataConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            data_dir: read("MATCH_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            stats_file: read("MATCH_STATS_FILE").unwrap_or(defaults.stats_file),
            events_file: read("MATCH_EVENTS_FILE").unwrap_or(defaults.events_file),
            heat_file: read("MATCH_HEAT_FILE").unwrap_or(defaults.heat_file),
            shots_file: read("MATCH_SHOTS_FILE").unwrap_or(defaults.shots_file),
        }
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn stats_path(&self) -> PathBuf {
        self.data_dir.join(&self.stats_file)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }

    pub fn heat_path(&self) -> PathBuf {
        self.data_dir.join(&self.heat_file)
    }

    pub fn shots_path(&self) -> PathBuf {
        self.data_dir.join(&self.shots_file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let level = env::var("MATCH_LOG_LEVEL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Self { level }
    }
}
