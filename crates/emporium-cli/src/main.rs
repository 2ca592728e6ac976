//! Emporium command line tools.
//!
//! Inspect how permission names are classified and grouped, and check how a
//! stored role maps onto a permission catalog.
//!
//! # Quick Start
//!
//! ```bash
//! # Classify permission names
//! emporium classify view_products manage_settings
//!
//! # Group a catalog exported as JSON
//! emporium groups --catalog permissions.json
//!
//! # Open a role against the catalog
//! emporium resolve --catalog permissions.json --role role.json
//! ```

mod commands;
mod style;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use emporium_config::{EmporiumConfig, LoggingConfig};
use tracing_subscriber::EnvFilter;

use commands::OutputFormat;
use commands::config::ConfigFormat;

/// Emporium - permission catalogs and role assignment.
#[derive(Parser)]
#[command(name = "emporium")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory holding emporium.toml.
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify permission names into category and scope.
    Classify {
        /// Permission names, e.g. view_products.
        #[arg(required = true)]
        names: Vec<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Group a permission catalog into categories.
    Groups {
        /// JSON file with an array of permissions.
        #[arg(short, long)]
        catalog: PathBuf,

        /// Group by scope instead of action prefix.
        #[arg(long)]
        by_scope: bool,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Open a role against a catalog and show the selection.
    Resolve {
        /// JSON file with an array of permissions.
        #[arg(short, long)]
        catalog: PathBuf,

        /// JSON file with the role.
        #[arg(short, long)]
        role: PathBuf,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Validate a role name and guard.
    CheckRole {
        /// Role name.
        #[arg(short, long)]
        name: String,

        /// Guard name.
        #[arg(short, long)]
        guard: String,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration.
    Show {
        #[arg(short, long, value_enum, default_value_t)]
        format: ConfigFormat,
    },

    /// Validate the configuration files.
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    style::set_no_color(cli.no_color);

    let config = EmporiumConfig::load_from_dir(&cli.project);

    // RUST_LOG wins over the configured filter.
    let filter = config
        .as_ref()
        .map_or_else(|_| LoggingConfig::default().filter, |c| c.logging.filter.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Classify { names, format } => commands::classify::run(&names, format),
        Commands::Groups {
            catalog,
            by_scope,
            format,
        } => commands::groups::run(&catalog, by_scope, format),
        Commands::Resolve {
            catalog,
            role,
            format,
        } => {
            let config: EmporiumConfig = config?;
            commands::resolve::run(&catalog, &role, config.editor.to_settings(), format)
        }
        Commands::CheckRole {
            name,
            guard,
            format,
        } => commands::check_role::run(&name, &guard, format),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { format } => commands::config::show(&config?, format),
            ConfigCommands::Validate => commands::config::validate(&cli.project),
        },
    }
}
