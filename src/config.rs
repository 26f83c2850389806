use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::filter::{Filter, Filters};

/// Preferences remembered between runs. Holds filter defaults only, never quiz progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub category: String,
    pub difficulty: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category: "all".to_string(),
            difficulty: "all".to_string(),
        }
    }
}

impl Config {
    /// Stored filters; values that no longer parse fall back to `All`
    pub fn filters(&self) -> Filters {
        Filters::new(
            self.category.parse().unwrap_or(Filter::All),
            self.difficulty.parse().unwrap_or(Filter::All),
        )
    }
}

impl From<Filters> for Config {
    fn from(filters: Filters) -> Self {
        Self {
            category: filters.category.to_string(),
            difficulty: filters.difficulty.to_string(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "gapfill") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("gapfill_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => tracing::warn!("ignoring unreadable config {}: {}", self.path.display(), e),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // serde_json errors convert into io::Error
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
