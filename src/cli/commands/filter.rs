//! Filter command implementation
//!
//! Applies ad-hoc rules to JSON files without a configuration file.

use crate::processor::{process_file, DocumentOutcome, FileTargets};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use swagger_transform::{FilterRule, OrphanStrategy, TransformRules};
use tracing::{error, info};

pub fn command() -> Command {
    Command::new("filter")
        .about("Filter OpenAPI JSON files using rules given on the command line")
        .arg(
            clap::Arg::new("input")
                .help("Input files or glob patterns")
                .value_name("INPUT")
                .required(true)
                .num_args(1..),
        )
        .arg(
            clap::Arg::new("include-tag")
                .long("include-tag")
                .help("Keep only operations carrying this tag (repeatable)")
                .value_name("TAG")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("exclude-tag")
                .long("exclude-tag")
                .help("Drop operations carrying this tag (repeatable)")
                .value_name("TAG")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("include-scheme")
                .long("include-scheme")
                .help("Keep only this security scheme (repeatable)")
                .value_name("NAME")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("exclude-scheme")
                .long("exclude-scheme")
                .help("Drop this security scheme (repeatable)")
                .value_name("NAME")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("clean-orphans")
                .long("clean-orphans")
                .help("Remove schemas no kept operation references")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("orphan-strategy")
                .long("orphan-strategy")
                .help("How schema references are followed")
                .value_name("STRATEGY")
                .value_parser(["direct", "transitive"])
                .default_value("transitive"),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the filtered JSON here instead of in place (single input only)")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("yaml")
                .long("yaml")
                .help("Also write a YAML copy here (single input only)")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would be removed without writing files")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let rules = rules_from_matches(matches);
    let inputs = expand_inputs(matches)?;

    let output = matches.get_one::<String>("output").map(PathBuf::from);
    let yaml = matches.get_one::<String>("yaml").map(PathBuf::from);
    if inputs.len() > 1 && (output.is_some() || yaml.is_some()) {
        return Err(anyhow!(
            "--output and --yaml need exactly one input, got {}",
            inputs.len()
        ));
    }

    let dry_run = matches.get_flag("dry-run");
    let mut failures = 0;

    for input in &inputs {
        let mut targets = FileTargets::in_place(input).with_yaml(yaml.clone());
        if let Some(output) = &output {
            targets = targets.with_destination(output);
        }

        match process_file(&targets, &rules, dry_run) {
            Ok(DocumentOutcome::Processed(processed)) => {
                println!("{}: {}", input.display(), processed.report.summary());
            }
            Ok(DocumentOutcome::MissingSource(path)) => {
                println!("{}: not found, skipped", path.display());
            }
            Ok(_) => {}
            Err(e) => {
                error!("{}", e);
                eprintln!("Error: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} file(s) failed", failures, inputs.len()));
    }

    Ok(())
}

fn values(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Build transformation rules from the command line flags
pub fn rules_from_matches(matches: &ArgMatches) -> TransformRules {
    let clean_orphans = matches.get_flag("clean-orphans").then(|| {
        match matches.get_one::<String>("orphan-strategy").map(String::as_str) {
            Some("direct") => OrphanStrategy::Direct,
            _ => OrphanStrategy::Transitive,
        }
    });

    TransformRules {
        operation_tags: FilterRule::new(
            values(matches, "include-tag"),
            values(matches, "exclude-tag"),
        ),
        security_schemes: FilterRule::new(
            values(matches, "include-scheme"),
            values(matches, "exclude-scheme"),
        ),
        clean_orphans,
    }
}

/// Expand glob patterns. A pattern matching nothing is kept as a literal
/// path, which then reports as missing.
fn expand_inputs(matches: &ArgMatches) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for pattern in values(matches, "input") {
        let mut matched = false;
        for entry in glob::glob(&pattern)
            .map_err(|e| anyhow!("Invalid input pattern {}: {}", pattern, e))?
        {
            inputs.push(entry?);
            matched = true;
        }
        if !matched {
            info!("Pattern {} matched no files", pattern);
            inputs.push(PathBuf::from(pattern));
        }
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["filter"];
        argv.extend_from_slice(args);
        command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_rules_from_flags() {
        let matches = parse(&[
            "api.json",
            "--include-tag",
            "public",
            "--include-tag",
            "users",
            "--exclude-scheme",
            "oauth2",
            "--clean-orphans",
            "--orphan-strategy",
            "direct",
        ]);

        let rules = rules_from_matches(&matches);

        assert_eq!(rules.operation_tags, FilterRule::new(["public", "users"], []));
        assert_eq!(rules.security_schemes, FilterRule::new([], ["oauth2"]));
        assert_eq!(rules.clean_orphans, Some(OrphanStrategy::Direct));
    }

    #[test]
    fn test_defaults_are_identity() {
        let rules = rules_from_matches(&parse(&["api.json"]));
        assert_eq!(rules, TransformRules::default());
    }

    #[test]
    fn test_unmatched_pattern_is_kept_literally() {
        let matches = parse(&["/definitely/not/here/*.json"]);
        let inputs = expand_inputs(&matches).unwrap();
        assert_eq!(inputs, vec![PathBuf::from("/definitely/not/here/*.json")]);
    }
}
