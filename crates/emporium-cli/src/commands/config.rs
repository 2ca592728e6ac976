//! Configuration management commands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use emporium_config::{ConfigLoader, EmporiumConfig, Paths};

use super::print_json;
use crate::style::{print_header, print_labeled, print_spacer, print_success};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Text,
    Json,
    Toml,
}

/// Show the effective configuration.
pub fn show(config: &EmporiumConfig, format: ConfigFormat) -> Result<()> {
    match format {
        ConfigFormat::Json => print_json(config)?,
        ConfigFormat::Toml => {
            let toml_str = config.to_toml()?;
            println!("{toml_str}");
        }
        ConfigFormat::Text => {
            print_header("Emporium Configuration");
            print_spacer();

            println!("Editor:");
            print_labeled("Default guard", &config.editor.default_guard_name);
            print_labeled(
                "Unresolved permissions",
                &format!("{:?}", config.editor.unresolved_policy).to_lowercase(),
            );
            print_spacer();

            println!("Logging:");
            print_labeled("Filter", &config.logging.filter);
        }
    }

    Ok(())
}

/// Validate the configuration files of a project.
pub fn validate(project: &Path) -> Result<()> {
    if !Paths::is_configured(project) {
        println!(
            "No emporium.toml in {}; built-in defaults apply.",
            project.display()
        );
    }

    ConfigLoader::new()
        .with_project_dir(project)
        .load()
        .context("Configuration validation failed")?;

    print_success("Configuration is valid");
    Ok(())
}
