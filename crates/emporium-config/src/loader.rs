//! Configuration loader with multi-source merging

use crate::{EmporiumConfig, Paths};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    user_config: bool,
    environment: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "EMPORIUM".to_string(),
            user_config: true,
            environment: None,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "EMPORIUM")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skip ~/.config/emporium/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Read variables from `vars` instead of the process environment.
    pub fn with_environment(mut self, vars: HashMap<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<EmporiumConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = EmporiumConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/emporium/config.toml)
        if self.user_config {
            let paths = Paths::new();
            if let Ok(user_config_file) = paths.user_config_file() {
                if user_config_file.exists() {
                    builder = builder.add_source(
                        config::File::from(user_config_file)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // 3. Project config (emporium.toml)
        let project_config_file = Paths::project_config_file(&self.project_dir);
        if project_config_file.exists() {
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Local config (emporium.local.toml, gitignored)
        let local_config_file = Paths::local_config_file(&self.project_dir);
        if local_config_file.exists() {
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 5. Environment variables (EMPORIUM_EDITOR__DEFAULT_GUARD_NAME=...)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .source(self.environment.map(|vars| vars.into_iter().collect())),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let emporium_config: EmporiumConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        emporium_config.validate()?;

        Ok(emporium_config)
    }

    /// Load configuration or return defaults if it is missing or invalid
    pub fn load_or_default(self) -> EmporiumConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
