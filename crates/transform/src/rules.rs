//! Include/exclude rules applied by the filters

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A pair of include/exclude name sets.
///
/// An empty include set admits everything; exclusion always wins over inclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRule {
    pub include: HashSet<String>,
    pub exclude: HashSet<String>,
}

impl FilterRule {
    pub fn new<I, E, S>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Rule that keeps everything
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check a single name (security scheme keys)
    pub fn admits(&self, name: &str) -> bool {
        let included = self.include.is_empty() || self.include.contains(name);
        let excluded = self.exclude.contains(name);
        included && !excluded
    }

    /// Check a list of labels (operation tags). Only membership matters.
    pub fn admits_any<'a, I>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut included = self.include.is_empty();

        for label in labels {
            if self.exclude.contains(label) {
                return false;
            }
            if !included && self.include.contains(label) {
                included = true;
            }
        }

        included
    }
}

/// How schema liveness is computed when pruning orphans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanStrategy {
    /// Only `$ref` values found directly under `paths` keep a schema alive
    Direct,

    /// Refs are followed through the document, so schemas reached through
    /// other components or other schemas are kept too
    #[default]
    Transitive,
}

/// Full rule set for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformRules {
    pub operation_tags: FilterRule,
    pub security_schemes: FilterRule,

    /// Orphan pruning runs only when set
    pub clean_orphans: Option<OrphanStrategy>,
}
