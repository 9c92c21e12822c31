//! Runtime configuration.
//!
//! Layered: built-in defaults, then an optional YAML file, then explicit
//! overrides (CLI flags or their environment variables).
//!
//! ```yaml
//! tasks_file: ~/tasks/TaskManager.json
//! learning_file: ~/tasks/learned_words.json
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TASKS_FILE: &str = "./TaskManager.json";
pub const DEFAULT_LEARNING_FILE: &str = "./learned_words.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Task list JSON file
    pub tasks_file: PathBuf,
    /// Learning store JSON file
    pub learning_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
            learning_file: PathBuf::from(DEFAULT_LEARNING_FILE),
        }
    }
}

impl Config {
    /// Read a YAML config file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        Self::from_yaml_str(&content).context(format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(content)?;
        config.tasks_file = expand_home(&config.tasks_file);
        config.learning_file = expand_home(&config.learning_file);
        Ok(config)
    }

    /// Defaults, or the YAML file at `path` when given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_yaml_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Replace paths with explicitly supplied values
    pub fn with_overrides(mut self, tasks_file: Option<PathBuf>, learning_file: Option<PathBuf>) -> Self {
        if let Some(p) = tasks_file {
            self.tasks_file = p;
        }
        if let Some(p) = learning_file {
            self.learning_file = p;
        }
        self
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(rest)
        }
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.tasks_file, PathBuf::from(DEFAULT_TASKS_FILE));
        assert_eq!(config.learning_file, PathBuf::from(DEFAULT_LEARNING_FILE));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str("tasks_file: /data/tasks.json\n").unwrap();
        assert_eq!(config.tasks_file, PathBuf::from("/data/tasks.json"));
        assert_eq!(config.learning_file, PathBuf::from(DEFAULT_LEARNING_FILE));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Config::from_yaml_str("tasks_file: [unclosed").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::from_yaml_str("learning_file: /a.json\n")
            .unwrap()
            .with_overrides(None, Some(PathBuf::from("/b.json")));
        assert_eq!(config.learning_file, PathBuf::from("/b.json"));
        assert_eq!(config.tasks_file, PathBuf::from(DEFAULT_TASKS_FILE));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task_core.yaml");
        let config = Config {
            tasks_file: dir.path().join("t.json"),
            learning_file: dir.path().join("l.json"),
        };
        fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

        assert_eq!(Config::from_yaml_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_yaml_file(dir.path().join("nope.yaml")).is_err());
    }
}
