//! swagger-prune library
//!
//! Post-processes generated OpenAPI documents: filters operations by tag and
//! security schemes by name, drops orphan schemas and optionally mirrors the
//! result as YAML.

pub mod cli;
pub mod config;
pub mod processor;
pub mod utils;

pub use config::{Config, DocPaths, DocumentationConfig, FilterOptions, GenerationConfig};
pub use processor::{process_file, DocumentError, DocumentOutcome, FileTargets, ProcessedDocument};
pub use swagger_transform::{FilterRule, OrphanStrategy, TransformReport, TransformRules};

use std::time::Instant;
use tracing::{error, info, warn};

/// Which documentations to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every configured documentation
    All,

    /// One documentation; `None` means the configured default
    Named(Option<String>),
}

/// Main application context
pub struct SwaggerPrune {
    config: Config,
}

impl SwaggerPrune {
    /// Create a new instance with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolve a selection to documentation names, in processing order
    pub fn select(&self, selection: &Selection) -> SwaggerPruneResult<Vec<String>> {
        match selection {
            Selection::All => Ok(self.config.documentations.keys().cloned().collect()),
            Selection::Named(Some(name)) => {
                if self.config.documentation(name).is_none() {
                    return Err(SwaggerPruneError::UnknownDocumentation(name.clone()));
                }
                Ok(vec![name.clone()])
            }
            Selection::Named(None) => self
                .config
                .default_documentation()
                .map(|name| vec![name.to_string()])
                .ok_or(SwaggerPruneError::NoDefaultDocumentation),
        }
    }

    /// Process a single documentation
    pub fn process_documentation(
        &self,
        name: &str,
        dry_run: bool,
    ) -> SwaggerPruneResult<DocumentOutcome> {
        let documentation = self
            .config
            .documentation(name)
            .ok_or_else(|| SwaggerPruneError::UnknownDocumentation(name.to_string()))?;

        let options = match &documentation.options {
            Some(options) if documentation.is_configured() => options,
            _ => {
                warn!("No filtering options for documentation {}, skipping", name);
                return Ok(DocumentOutcome::Unconfigured);
            }
        };

        let json_path = documentation
            .paths
            .json_file()
            .map_err(|e| DocumentError::Paths(e.to_string()))?;
        let Some(json_path) = json_path else {
            info!("No JSON path configured for documentation {}, skipping", name);
            return Ok(DocumentOutcome::NoOutputPath);
        };

        let yaml_path = if documentation.generate_yaml_copy {
            documentation
                .paths
                .yaml_file()
                .map_err(|e| DocumentError::Paths(e.to_string()))?
        } else {
            None
        };

        info!("Regenerating docs {}", name);

        let targets = FileTargets::in_place(json_path).with_yaml(yaml_path);
        Ok(process_file(&targets, &options.to_rules(), dry_run)?)
    }

    /// Process documentations one after another.
    ///
    /// Each documentation gets its own tree; a failure is recorded and the
    /// batch moves on unless `generation.fail_fast` is set.
    pub fn run(&self, names: &[String], dry_run: bool) -> BatchResult {
        let mut results = Vec::with_capacity(names.len());
        let mut aborted = false;

        for name in names {
            let start_time = Instant::now();
            let outcome = self.process_documentation(name, dry_run);
            let processing_time_ms = start_time.elapsed().as_millis() as u64;

            let failed = outcome.is_err();
            if let Err(e) = &outcome {
                error!("Failed to process documentation {}: {}", name, e);
            }

            results.push(DocumentResult {
                name: name.clone(),
                outcome,
                processing_time_ms,
            });

            if failed && self.config.generation.fail_fast {
                aborted = true;
                break;
            }
        }

        BatchResult {
            total_documents: names.len(),
            results,
            aborted,
        }
    }
}

/// Result of processing one documentation
#[derive(Debug)]
pub struct DocumentResult {
    pub name: String,
    pub outcome: SwaggerPruneResult<DocumentOutcome>,
    pub processing_time_ms: u64,
}

/// Result of a batch run
#[derive(Debug)]
pub struct BatchResult {
    pub total_documents: usize,
    pub results: Vec<DocumentResult>,

    /// Stopped early because of `fail_fast`
    pub aborted: bool,
}

impl BatchResult {
    /// Documentations that failed
    pub fn failures(&self) -> impl Iterator<Item = &DocumentResult> {
        self.results.iter().filter(|r| r.outcome.is_err())
    }

    pub fn failed(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Documentations that went through the pipeline
    pub fn processed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Ok(DocumentOutcome::Processed(_))))
            .count()
    }
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum SwaggerPruneError {
    #[error("Unknown documentation: {0}")]
    UnknownDocumentation(String),

    #[error("No documentation named and no default documentation configured")]
    NoDefaultDocumentation,

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Result type for the main application
pub type SwaggerPruneResult<T> = Result<T, SwaggerPruneError>;
