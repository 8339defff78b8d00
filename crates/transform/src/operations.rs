//! Operation filtering by tag

use crate::rules::FilterRule;
use serde_json::{Map, Value};
use tracing::debug;

/// Path item keys that hold operations
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Outcome of filtering a `paths` mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationStats {
    pub operations_removed: usize,
    pub paths_removed: Vec<String>,
}

pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.iter().any(|m| m.eq_ignore_ascii_case(key))
}

/// Tags declared by an operation. A missing or malformed `tags` field yields none.
pub fn operation_tags(operation: &Value) -> impl Iterator<Item = &str> {
    operation
        .get("tags")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

/// Drop operations rejected by `rule`, then drop path items left without operations.
pub fn filter_operations(paths: &mut Map<String, Value>, rule: &FilterRule) -> OperationStats {
    let mut stats = OperationStats::default();

    paths.retain(|path, item| {
        let Some(methods) = item.as_object_mut() else {
            return true;
        };

        let declared = methods.keys().filter(|k| is_http_method(k)).count();

        methods.retain(|method, operation| {
            if !is_http_method(method) || rule.admits_any(operation_tags(operation)) {
                return true;
            }
            debug!("Removing operation {} {}", method.to_uppercase(), path);
            stats.operations_removed += 1;
            false
        });

        let remaining = methods.keys().filter(|k| is_http_method(k)).count();
        let drop_path = methods.is_empty() || (declared > 0 && remaining == 0);

        if drop_path {
            debug!("Removing path {} (no operations left)", path);
            stats.paths_removed.push(path.clone());
        }

        !drop_path
    });

    stats
}

/// Apply the operation filter to a whole document. No `paths` key means nothing to do.
pub fn apply_operation_filter(document: &mut Value, rule: &FilterRule) -> OperationStats {
    match document.get_mut("paths").and_then(Value::as_object_mut) {
        Some(paths) => filter_operations(paths, rule),
        None => OperationStats::default(),
    }
}
