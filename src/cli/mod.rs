//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("swagger-prune")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Filter generated OpenAPI documents and prune orphan schemas")
            .arg(
                clap::Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Enable debug logging")
                    .global(true)
                    .action(clap::ArgAction::Count),
            )
            .subcommand(commands::init::command())
            .subcommand(commands::generate::command())
            .subcommand(commands::filter::command())
            .subcommand(commands::validate::command())
    }

    /// Run the CLI application
    pub fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches),
            Some(("generate", sub_matches)) => commands::generate::run(sub_matches),
            Some(("filter", sub_matches)) => commands::filter::run(sub_matches),
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches),
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::path::PathBuf;

    /// Configuration file names looked up in the working directory
    pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
        ".swagger-prune.yaml",
        ".swagger-prune.yml",
        "swagger-prune.yaml",
        "swagger-prune.yml",
    ];

    /// Get configuration file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(config_path));
        }

        for name in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(name);
            if path.exists() {
                return Ok(path);
            }
        }

        let user_config = crate::utils::get_config_dir()?.join("config.yaml");
        if user_config.exists() {
            return Ok(user_config);
        }

        Err(anyhow!("No configuration file found. Use --config to specify a file or create one with 'swagger-prune init'"))
    }

    /// Load configuration from file
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        let config_path = get_config_path(matches)?;
        crate::Config::from_file(&config_path)
    }

    /// Create the application context
    pub fn create_app(config: crate::Config) -> crate::SwaggerPrune {
        crate::SwaggerPrune::new(config)
    }

    /// Shared `--config` argument
    pub fn config_arg() -> clap::Arg {
        clap::Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }
}
