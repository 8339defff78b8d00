//! Per-file processing: read, transform, write back, mirror to YAML

use std::io;
use std::path::{Path, PathBuf};
use swagger_transform::{
    decode_document, encode_json, encode_yaml, transform, CodecError, TransformReport,
    TransformRules,
};
use tracing::{debug, info};

use crate::utils::write_atomic;

/// Files touched while processing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTargets {
    /// JSON document to read
    pub source: PathBuf,

    /// Where the filtered JSON goes
    pub destination: PathBuf,

    /// Optional YAML mirror
    pub yaml: Option<PathBuf>,
}

impl FileTargets {
    /// Filter a file in place
    pub fn in_place(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            source: path.clone(),
            destination: path,
            yaml: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn with_yaml(mut self, yaml: Option<PathBuf>) -> Self {
        self.yaml = yaml;
        self
    }
}

/// A document that went through the pipeline
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub json_path: PathBuf,
    pub yaml_path: Option<PathBuf>,
    pub report: TransformReport,

    /// Nothing was written
    pub dry_run: bool,
}

/// What happened to one document
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Processed(ProcessedDocument),

    /// The source file does not exist; nothing to do
    MissingSource(PathBuf),

    /// No filtering options configured
    Unconfigured,

    /// The documentation has no resolvable JSON path
    NoOutputPath,
}

impl DocumentOutcome {
    pub fn report(&self) -> Option<&TransformReport> {
        match self {
            DocumentOutcome::Processed(processed) => Some(&processed.report),
            _ => None,
        }
    }
}

/// Failure while processing one document
#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid documentation paths: {0}")]
    Paths(String),
}

/// Run the transformation pipeline over one JSON file.
///
/// A missing source file is not an error. The JSON output is written before
/// the YAML mirror; both writes are atomic.
pub fn process_file(
    targets: &FileTargets,
    rules: &TransformRules,
    dry_run: bool,
) -> Result<DocumentOutcome, DocumentError> {
    let content = match std::fs::read_to_string(&targets.source) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Source {} does not exist, nothing to do", targets.source.display());
            return Ok(DocumentOutcome::MissingSource(targets.source.clone()));
        }
        Err(source) => {
            return Err(DocumentError::Read {
                path: targets.source.clone(),
                source,
            })
        }
    };

    let mut document = decode_document(&content).map_err(|source| DocumentError::Decode {
        path: targets.source.clone(),
        source,
    })?;

    let report = transform(&mut document, rules);
    if report.is_noop() {
        info!("{}: nothing to remove", targets.source.display());
    } else {
        info!("{}: {}", targets.source.display(), report.summary());
    }

    if dry_run {
        debug!("Dry run, not writing {}", targets.destination.display());
    } else {
        let json = encode_json(&document).map_err(|source| DocumentError::Encode {
            path: targets.destination.clone(),
            source,
        })?;
        write_file(&targets.destination, json.as_bytes())?;

        if let Some(yaml_path) = &targets.yaml {
            let yaml = encode_yaml(&document).map_err(|source| DocumentError::Encode {
                path: yaml_path.clone(),
                source,
            })?;
            write_file(yaml_path, yaml.as_bytes())?;
            debug!("Wrote YAML copy {}", yaml_path.display());
        }
    }

    Ok(DocumentOutcome::Processed(ProcessedDocument {
        json_path: targets.destination.clone(),
        yaml_path: targets.yaml.clone(),
        report,
        dry_run,
    }))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), DocumentError> {
    write_atomic(path, contents).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;
    use swagger_transform::{FilterRule, OrphanStrategy};
    use tempfile::TempDir;

    fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_missing_source_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let targets = FileTargets::in_place(temp_dir.path().join("absent.json"));

        let outcome = process_file(&targets, &TransformRules::default(), false).unwrap();

        assert!(matches!(outcome, DocumentOutcome::MissingSource(_)));
        assert!(!targets.source.exists());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ \"paths\": ").unwrap();

        let err = process_file(&FileTargets::in_place(&path), &TransformRules::default(), false)
            .unwrap_err();

        assert!(matches!(err, DocumentError::Decode { .. }));
        assert!(err.to_string().contains("broken.json"));
        // The source is left as it was
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"paths\": ");
    }

    #[test]
    fn test_filters_in_place_and_mirrors_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_json(
            temp_dir.path(),
            "api-docs.json",
            &json!({
                "paths": {
                    "/users/{id}": {
                        "get": {
                            "tags": ["users"],
                            "responses": { "200": { "$ref": "#/components/schemas/User" } }
                        },
                        "delete": { "tags": ["admin"] }
                    }
                },
                "components": { "schemas": { "User": {}, "Ghost": {} } }
            }),
        );
        let yaml_path = temp_dir.path().join("api-docs.yaml");
        let targets = FileTargets::in_place(&path).with_yaml(Some(yaml_path.clone()));
        let rules = TransformRules {
            operation_tags: FilterRule::new([], ["admin"]),
            security_schemes: FilterRule::identity(),
            clean_orphans: Some(OrphanStrategy::Transitive),
        };

        let outcome = process_file(&targets, &rules, false).unwrap();

        let report = outcome.report().unwrap();
        assert_eq!(report.operations_removed, 1);
        assert_eq!(report.schemas_removed, vec!["Ghost"]);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"/users/{id}\""));
        assert!(!written.contains("\\/"));

        let document = read_json(&path);
        assert!(document["paths"]["/users/{id}"].get("delete").is_none());
        assert_eq!(document["components"]["securitySchemes"], json!({}));

        let mirrored: Value =
            serde_yaml::from_str(&fs::read_to_string(&yaml_path).unwrap()).unwrap();
        assert_eq!(mirrored, document);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let original = json!({ "paths": { "/x": { "get": { "tags": ["a"] } } } });
        let path = write_json(temp_dir.path(), "api-docs.json", &original);
        let yaml_path = temp_dir.path().join("api-docs.yaml");
        let targets = FileTargets::in_place(&path).with_yaml(Some(yaml_path.clone()));
        let rules = TransformRules {
            operation_tags: FilterRule::new([], ["a"]),
            ..TransformRules::default()
        };

        let outcome = process_file(&targets, &rules, true).unwrap();

        assert_eq!(outcome.report().unwrap().paths_removed, vec!["/x"]);
        assert_eq!(read_json(&path), original);
        assert!(!yaml_path.exists());
    }

    #[test]
    fn test_separate_destination() {
        let temp_dir = TempDir::new().unwrap();
        let original = json!({ "paths": { "/x": { "get": { "tags": ["a"] } } } });
        let source = write_json(temp_dir.path(), "in.json", &original);
        let destination = temp_dir.path().join("out/filtered.json");

        let targets = FileTargets::in_place(&source).with_destination(&destination);
        process_file(&targets, &TransformRules::default(), false).unwrap();

        assert_eq!(read_json(&source), original);
        assert_eq!(read_json(&destination)["paths"], original["paths"]);
    }
}
