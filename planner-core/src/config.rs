//! Global planner configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/planner";
const DEFAULT_LIST_DAYS: u64 = 14;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_list_days() -> u64 {
    DEFAULT_LIST_DAYS
}

/// Global configuration at ~/.config/planner/config.toml
///
/// Any key can be overridden from the environment with a `PLANNER_` prefix,
/// e.g. `PLANNER_DATA_DIR=/tmp/planner`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Where events.json lives
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Color index given to new events
    #[serde(default)]
    pub default_color: i32,

    /// Default number of days shown by `planner list`
    #[serde(default = "default_list_days")]
    pub list_days: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_dir: default_data_dir(),
            default_color: 0,
            list_days: DEFAULT_LIST_DAYS,
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> PlannerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlannerError::Config("Could not determine config directory".into()))?
            .join("planner");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file on first run.
    pub fn load() -> PlannerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from `path` plus `PLANNER_*` environment overrides.
    pub fn load_from(path: &Path) -> PlannerResult<Self> {
        let config: PlannerConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("PLANNER"))
            .build()
            .map_err(|e| PlannerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlannerError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), data_dir = %config.data_dir.display(), "Loaded config");
        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> PlannerResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PlannerError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlannerResult<()> {
        let contents = format!(
            "\
# planner configuration

# Where your events are stored:
# data_dir = \"{}\"

# Color index for new events:
# default_color = 0

# Days shown by `planner list` when --to is omitted:
# list_days = {}
",
            DEFAULT_DATA_DIR, DEFAULT_LIST_DAYS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_file_loads_as_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("planner/config.toml");

        PlannerConfig::create_default_config(&path).unwrap();
        let config = PlannerConfig::load_from(&path).unwrap();

        assert_eq!(config.default_color, 0);
        assert_eq!(config.list_days, 14);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PlannerConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.list_days, DEFAULT_LIST_DAYS);
    }

    #[test]
    fn saved_values_are_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = PlannerConfig {
            data_dir: dir.path().join("data"),
            default_color: 3,
            list_days: 30,
        };

        config.save(&path).unwrap();
        let loaded = PlannerConfig::load_from(&path).unwrap();

        assert_eq!(loaded.default_color, 3);
        assert_eq!(loaded.list_days, 30);
        assert_eq!(loaded.data_dir, dir.path().join("data"));
    }

    #[test]
    fn data_path_expands_tilde() {
        let config = PlannerConfig::default();
        let expanded = config.data_path();

        assert!(expanded.ends_with(".local/share/planner"));
        if let Some(home) = dirs::home_dir() {
            assert!(expanded.starts_with(home));
        }
    }

    #[test]
    fn invalid_value_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "list_days = \"soon\"\n").unwrap();

        let result = PlannerConfig::load_from(&path);
        assert!(matches!(result, Err(PlannerError::Config(_))));
    }
}
