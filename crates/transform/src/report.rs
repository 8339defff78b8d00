//! Result types for a document transformation

/// What a transformation removed from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Number of operations dropped by the tag filter
    pub operations_removed: usize,

    /// Paths dropped because no operation survived
    pub paths_removed: Vec<String>,

    /// Security schemes dropped by the name filter
    pub security_schemes_removed: Vec<String>,

    /// Schemas dropped as orphans
    pub schemas_removed: Vec<String>,
}

impl TransformReport {
    /// True when nothing was removed
    pub fn is_noop(&self) -> bool {
        self.operations_removed == 0
            && self.paths_removed.is_empty()
            && self.security_schemes_removed.is_empty()
            && self.schemas_removed.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} operation(s), {} path(s), {} security scheme(s), {} schema(s) removed",
            self.operations_removed,
            self.paths_removed.len(),
            self.security_schemes_removed.len(),
            self.schemas_removed.len()
        )
    }
}
