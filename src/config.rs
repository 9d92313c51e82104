//! Widget configuration.
//!
//! Every field has a default matching the stock widget, so a config file
//! only needs the keys it changes:
//!
//! ```toml
//! heading = "Groceries"
//! tasks = ["Buy milk", "Buy bread"]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Text and seed data of the TODO widget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TodoConfig {
    /// Heading above the list.
    pub heading: String,
    /// Placeholder of the new-task input.
    pub placeholder: String,
    /// Notification shown when adding with an empty input.
    pub empty_task_message: String,
    /// Tasks present at startup, all incomplete.
    pub tasks: Vec<String>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            heading: "TODO List".to_string(),
            placeholder: "Задание".to_string(),
            empty_task_message: "Task name cannot be empty".to_string(),
            tasks: vec![
                "Сделать домашку".to_string(),
                "Сделать практику".to_string(),
                "Пойти домой".to_string(),
            ],
        }
    }
}

impl TodoConfig {
    /// Config with no seed tasks.
    pub fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), tasks = config.tasks.len(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TodoConfig::default();
        assert_eq!(config.heading, "TODO List");
        assert_eq!(config.placeholder, "Задание");
        assert_eq!(config.tasks.len(), 3);
        assert!(TodoConfig::empty().tasks.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TodoConfig::from_toml_str(
            r#"
            heading = "Groceries"
            tasks = ["Buy milk"]
            "#,
        )
        .unwrap();

        assert_eq!(config.heading, "Groceries");
        assert_eq!(config.tasks, vec!["Buy milk".to_string()]);
        assert_eq!(config.placeholder, "Задание");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(TodoConfig::from_toml_str("").unwrap(), TodoConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TodoConfig::from_toml_str("heading = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            TodoConfig::from_toml_str("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = TodoConfig::load("/nonexistent/todo.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/todo.toml"));
    }
}
