//! Path utilities and XDG directory discovery

use crate::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "emporium.toml";

/// Local override file name, kept out of version control.
pub const LOCAL_CONFIG_FILE: &str = "emporium.local.toml";

/// XDG-compliant paths for Emporium
pub struct Paths {
    project_dirs: Option<ProjectDirs>,
}

impl Paths {
    /// Create a new Paths instance with XDG discovery
    pub fn new() -> Self {
        Self {
            project_dirs: ProjectDirs::from("com", "Emporium", "emporium"),
        }
    }

    /// Get user config directory (~/.config/emporium/)
    pub fn user_config_dir(&self) -> Result<PathBuf, ConfigError> {
        self.project_dirs
            .as_ref()
            .map(|p| p.config_dir().to_path_buf())
            .ok_or_else(|| {
                ConfigError::XdgError("Failed to determine user config directory".to_string())
            })
    }

    /// Get user config file path (~/.config/emporium/config.toml)
    pub fn user_config_file(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.user_config_dir()?.join("config.toml"))
    }

    pub fn project_config_file(project_dir: impl AsRef<Path>) -> PathBuf {
        project_dir.as_ref().join(PROJECT_CONFIG_FILE)
    }

    pub fn local_config_file(project_dir: impl AsRef<Path>) -> PathBuf {
        project_dir.as_ref().join(LOCAL_CONFIG_FILE)
    }

    /// Check if a project carries its own configuration (has emporium.toml)
    pub fn is_configured(project_dir: impl AsRef<Path>) -> bool {
        Self::project_config_file(project_dir).exists()
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}
