//! OpenAPI document transformation
//!
//! Filters operations by tag and security schemes by name, then optionally
//! prunes schema definitions that are no longer referenced.

pub mod codec;
pub mod operations;
pub mod orphans;
pub mod pipeline;
pub mod refs;
pub mod report;
pub mod rules;
pub mod security;

pub use codec::{decode_document, encode_json, encode_yaml, CodecError};
pub use pipeline::transform;
pub use report::TransformReport;
pub use rules::{FilterRule, OrphanStrategy, TransformRules};
