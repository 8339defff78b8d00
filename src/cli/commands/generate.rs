//! Generate command implementation

use crate::cli::utils;
use crate::utils::format_duration;
use crate::{BatchResult, DocumentOutcome, Selection};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::time::Duration;
use tracing::info;

pub fn command() -> Command {
    Command::new("generate")
        .about("Filter the configured documentations in place")
        .arg(
            clap::Arg::new("documentation")
                .help("Documentation to process (defaults to the configured default)")
                .value_name("DOCUMENTATION"),
        )
        .arg(
            clap::Arg::new("all")
                .long("all")
                .help("Process every configured documentation")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with("documentation"),
        )
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would be removed without writing files")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("fail-fast")
                .long("fail-fast")
                .help("Stop on first failed documentation")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = utils::load_config(matches)?;

    // Override fail_fast setting if specified
    if matches.get_flag("fail-fast") {
        config.generation.fail_fast = true;
    }

    let selection = if matches.get_flag("all") {
        Selection::All
    } else {
        Selection::Named(matches.get_one::<String>("documentation").cloned())
    };

    let dry_run = matches.get_flag("dry-run");
    if dry_run {
        info!("Dry run mode - no files will be written");
        println!("Dry run mode - no files will be written");
    }

    let app = utils::create_app(config);
    let names = app.select(&selection)?;
    let result = app.run(&names, dry_run);

    print_summary(&result);

    if result.failed() {
        let failed = result.failures().count();
        return Err(anyhow!(
            "{} of {} documentation(s) failed",
            failed,
            result.total_documents
        ));
    }

    Ok(())
}

fn print_summary(result: &BatchResult) {
    println!(
        "Documentations processed: {}/{}",
        result.processed_count(),
        result.total_documents
    );

    for doc in &result.results {
        match &doc.outcome {
            Ok(DocumentOutcome::Processed(processed)) => {
                println!(
                    "  {}: {} ({})",
                    doc.name,
                    processed.report.summary(),
                    format_duration(Duration::from_millis(doc.processing_time_ms))
                );
                if let Some(yaml_path) = &processed.yaml_path {
                    println!("    YAML copy: {}", yaml_path.display());
                }
            }
            Ok(DocumentOutcome::MissingSource(path)) => {
                println!("  {}: source {} not found, skipped", doc.name, path.display());
            }
            Ok(DocumentOutcome::Unconfigured) => {
                println!("  {}: no filtering options, skipped", doc.name);
            }
            Ok(DocumentOutcome::NoOutputPath) => {
                println!("  {}: no JSON path configured, skipped", doc.name);
            }
            Err(e) => {
                eprintln!("  {}: Error: {e}", doc.name);
            }
        }
    }

    if result.aborted {
        eprintln!(
            "Stopped after first failure; {} documentation(s) not processed",
            result.total_documents - result.results.len()
        );
    }
}
