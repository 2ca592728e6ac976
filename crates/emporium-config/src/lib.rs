//! Configuration management for Emporium
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (EMPORIUM_* prefix, highest precedence)
//! 2. emporium.local.toml (gitignored, local overrides)
//! 3. emporium.toml (git-tracked, project config)
//! 4. ~/.config/emporium/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! Nested keys are addressed from the environment with a double underscore:
//! `EMPORIUM_EDITOR__UNRESOLVED_POLICY=reject`.

use anyhow::Result;
use emporium_editor::{EditorSettings, UnresolvedPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Emporium configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmporiumConfig {
    pub editor: EditorConfig,
    pub logging: LoggingConfig,
}

/// Role editor behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Guard pre-filled when creating a role.
    pub default_guard_name: String,
    /// What to do when a role names permissions the catalog lacks.
    pub unresolved_policy: UnresolvedPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let settings = EditorSettings::default();
        Self {
            default_guard_name: settings.default_guard_name,
            unresolved_policy: settings.unresolved_policy,
        }
    }
}

impl From<EditorConfig> for EditorSettings {
    fn from(config: EditorConfig) -> Self {
        Self {
            default_guard_name: config.default_guard_name,
            unresolved_policy: config.unresolved_policy,
        }
    }
}

impl EditorConfig {
    pub fn to_settings(&self) -> EditorSettings {
        self.clone().into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl EmporiumConfig {
    /// Load configuration for `project_dir` from every source.
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Rejects values the editor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.default_guard_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "editor.default_guard_name must not be empty".to_string(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Renders the configuration as it would appear in `emporium.toml`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}
