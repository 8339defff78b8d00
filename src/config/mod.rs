//! Configuration management for swagger-prune

pub mod config;
pub mod documentation;
pub mod generation;
pub mod options;


// Re-export main types for convenience
pub use config::Config;
pub use documentation::{DocPaths, DocumentationConfig};
pub use generation::GenerationConfig;
pub use options::{FilterOptions, NameRule, RuleSet, TagRule};
