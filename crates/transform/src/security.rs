//! Security scheme filtering by name

use crate::rules::FilterRule;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Keep the schemes admitted by `rule`, in their original order.
///
/// Returns the surviving mapping together with the removed names.
pub fn filter_security_schemes(
    schemes: Map<String, Value>,
    rule: &FilterRule,
) -> (Map<String, Value>, Vec<String>) {
    let mut kept = Map::new();
    let mut removed = Vec::new();

    for (name, definition) in schemes {
        if rule.admits(&name) {
            kept.insert(name, definition);
        } else {
            debug!("Removing security scheme {}", name);
            removed.push(name);
        }
    }

    (kept, removed)
}

/// Filter `components.securitySchemes` in place.
///
/// Absent `components` or `securitySchemes` are created as empty mappings, so the
/// key is always present afterwards.
pub fn apply_security_filter(document: &mut Value, rule: &FilterRule) -> Vec<String> {
    let Some(root) = document.as_object_mut() else {
        return Vec::new();
    };

    let components = root
        .entry("components")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(components) = components.as_object_mut() else {
        warn!("`components` is not a mapping, leaving security schemes untouched");
        return Vec::new();
    };

    let slot = components
        .entry("securitySchemes")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(schemes) = slot.as_object_mut() else {
        warn!("`components.securitySchemes` is not a mapping, leaving it untouched");
        return Vec::new();
    };

    let (kept, removed) = filter_security_schemes(std::mem::take(schemes), rule);
    *schemes = kept;
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schemes() -> Map<String, Value> {
        json!({
            "api_key": { "type": "apiKey", "name": "X-API-KEY", "in": "header" },
            "oauth2": { "type": "oauth2" },
            "bearer": { "type": "http", "scheme": "bearer" }
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_include_by_name() {
        let (kept, removed) = filter_security_schemes(schemes(), &FilterRule::new(["api_key"], []));
        assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["api_key"]);
        assert_eq!(removed, vec!["oauth2", "bearer"]);
    }

    #[test]
    fn test_exclude_by_name_preserves_order() {
        let (kept, _) = filter_security_schemes(schemes(), &FilterRule::new([], ["oauth2"]));
        assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["api_key", "bearer"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rule = FilterRule::new(["api_key", "oauth2"], ["oauth2"]);
        let (once, _) = filter_security_schemes(schemes(), &rule);
        let (twice, removed) = filter_security_schemes(once.clone(), &rule);
        assert_eq!(once, twice);
        assert!(removed.is_empty());
    }

    #[test]
    fn test_definitions_are_not_inspected() {
        let mut document = json!({
            "components": { "securitySchemes": { "weird": "not even a mapping" } }
        });
        let removed = apply_security_filter(&mut document, &FilterRule::identity());
        assert!(removed.is_empty());
        assert_eq!(document["components"]["securitySchemes"]["weird"], json!("not even a mapping"));
    }

    #[test]
    fn test_absent_schemes_are_normalized() {
        let mut document = json!({ "openapi": "3.0.0" });
        apply_security_filter(&mut document, &FilterRule::identity());
        assert_eq!(
            document,
            json!({ "openapi": "3.0.0", "components": { "securitySchemes": {} } })
        );

        let mut document = json!({ "components": { "schemas": {} } });
        apply_security_filter(&mut document, &FilterRule::new(["api_key"], []));
        assert_eq!(
            document,
            json!({ "components": { "schemas": {}, "securitySchemes": {} } })
        );
    }

    #[test]
    fn test_non_mapping_components_left_alone() {
        let mut document = json!({ "components": [] });
        apply_security_filter(&mut document, &FilterRule::identity());
        assert_eq!(document, json!({ "components": [] }));
    }
}
