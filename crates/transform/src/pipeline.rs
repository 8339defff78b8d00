//! Fixed-order transformation pipeline

use crate::operations::apply_operation_filter;
use crate::orphans::apply_orphan_cleanup;
use crate::report::TransformReport;
use crate::rules::TransformRules;
use crate::security::apply_security_filter;
use serde_json::Value;
use tracing::debug;

/// Run the filters over `document` in place.
///
/// Operations are filtered first, then security schemes, then orphan schemas
/// (when enabled). Orphan detection reads the already filtered `paths`, so
/// schemas only used by removed operations are dropped too.
pub fn transform(document: &mut Value, rules: &TransformRules) -> TransformReport {
    let operations = apply_operation_filter(document, &rules.operation_tags);
    let security_schemes_removed = apply_security_filter(document, &rules.security_schemes);

    let schemas_removed = match rules.clean_orphans {
        Some(strategy) => {
            debug!("Cleaning orphan schemas ({:?})", strategy);
            apply_orphan_cleanup(document, strategy)
        }
        None => Vec::new(),
    };

    TransformReport {
        operations_removed: operations.operations_removed,
        paths_removed: operations.paths_removed,
        security_schemes_removed,
        schemas_removed,
    }
}
