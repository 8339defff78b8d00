//! Validate command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::{info, warn};

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate configuration file")
        .arg(utils::config_arg())
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating configuration file");

    let config = utils::load_config(matches)?;

    println!("Configuration file is valid!");
    println!("Version: {}", config.version);
    println!(
        "Default documentation: {}",
        config.default_documentation().unwrap_or("(none)")
    );
    println!("Documentations: {}", config.documentations.len());

    for (name, documentation) in &config.documentations {
        let json = documentation.paths.json_file()?;
        println!(
            "  - {} -> {}",
            name,
            json.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no JSON path)".to_string())
        );

        if documentation.generate_yaml_copy {
            match documentation.paths.yaml_file()? {
                Some(yaml) => println!("      YAML copy: {}", yaml.display()),
                None => println!("      YAML copy enabled but no YAML path configured"),
            }
        }

        if !documentation.is_configured() {
            warn!("No filtering options for documentation {}", name);
            println!("      Warning: no filtering options, will be skipped");
        }
    }

    Ok(())
}
