//! Init command implementation

use crate::config::{DocPaths, DocumentationConfig, FilterOptions, NameRule, RuleSet, TagRule};
use crate::Config;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use swagger_transform::OrphanStrategy;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".swagger-prune.yaml"),
        )
        .arg(
            clap::Arg::new("example")
                .short('e')
                .long("example")
                .help("Create example configuration")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("Missing output path"))?;
    let example = matches.get_flag("example");

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "{} already exists, use --force to overwrite",
            output_path.display()
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    let config = if example {
        create_example_config()
    } else {
        create_minimal_config()
    };

    config.save_to_file(&output_path)?;

    info!("Configuration file created: {:?}", output_path);

    if example {
        println!("Example configuration created with public/internal documentations.");
        println!("Edit the file to point at your generated documents.");
    } else {
        println!("Configuration file created with a single default documentation.");
        println!("Add filtering options to get started.");
    }

    Ok(())
}

fn default_paths(json: &str, yaml: &str) -> DocPaths {
    DocPaths {
        docs: Some("./storage/api-docs".to_string()),
        docs_json: Some(json.to_string()),
        docs_yaml: Some(yaml.to_string()),
    }
}

pub fn create_minimal_config() -> Config {
    let mut config = Config::default();
    config.default = Some("default".to_string());
    config.documentations.insert(
        "default".to_string(),
        DocumentationConfig {
            paths: default_paths("api-docs.json", "api-docs.yaml"),
            generate_yaml_copy: false,
            options: None,
        },
    );
    config
}

pub fn create_example_config() -> Config {
    let mut config = Config::default();
    config.default = Some("public".to_string());

    config.documentations.insert(
        "public".to_string(),
        DocumentationConfig {
            paths: default_paths("public-api-docs.json", "public-api-docs.yaml"),
            generate_yaml_copy: true,
            options: Some(FilterOptions {
                include: Some(RuleSet {
                    operations: Some(TagRule {
                        tags: vec!["public".to_string()],
                    }),
                    security_schemes: Some(NameRule {
                        names: vec!["api_key".to_string()],
                    }),
                }),
                exclude: Some(RuleSet {
                    operations: Some(TagRule {
                        tags: vec!["internal".to_string()],
                    }),
                    security_schemes: None,
                }),
                clean_orphan_schemas: Some(true),
                orphan_strategy: Some(OrphanStrategy::Transitive),
            }),
        },
    );

    config.documentations.insert(
        "internal".to_string(),
        DocumentationConfig {
            paths: default_paths("internal-api-docs.json", "internal-api-docs.yaml"),
            generate_yaml_copy: false,
            options: Some(FilterOptions {
                exclude: Some(RuleSet {
                    operations: None,
                    security_schemes: Some(NameRule {
                        names: vec!["api_key".to_string()],
                    }),
                }),
                ..FilterOptions::default()
            }),
        },
    );

    config
}
