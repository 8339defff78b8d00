//! Orphan schema pruning

use crate::refs::{collect_refs, reachable_refs};
use crate::rules::OrphanStrategy;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Canonical reference string for a schema name: the name appended verbatim
pub fn schema_ref(name: &str) -> String {
    format!("{SCHEMA_REF_PREFIX}{name}")
}

/// Reference string with the name escaped as a JSON pointer token
pub fn escaped_schema_ref(name: &str) -> String {
    // `~` first, then `/`
    let escaped = name.replace('~', "~0").replace('/', "~1");
    format!("{SCHEMA_REF_PREFIX}{escaped}")
}

fn is_live(name: &str, live: &HashSet<String>) -> bool {
    live.contains(&schema_ref(name)) || live.contains(&escaped_schema_ref(name))
}

/// Remove every schema referenced in `live` neither verbatim nor pointer-escaped.
/// Returns the removed names in document order.
pub fn prune_schemas(schemas: &mut Map<String, Value>, live: &HashSet<String>) -> Vec<String> {
    let mut removed = Vec::new();

    schemas.retain(|name, _| {
        if is_live(name, live) {
            return true;
        }
        debug!("Removing orphan schema {}", name);
        removed.push(name.clone());
        false
    });

    removed
}

/// References that keep schemas alive, taken from the (already filtered) `paths`.
pub fn live_refs(document: &Value, strategy: OrphanStrategy) -> HashSet<String> {
    let Some(paths) = document.get("paths") else {
        return HashSet::new();
    };

    match strategy {
        OrphanStrategy::Direct => collect_refs(paths),
        OrphanStrategy::Transitive => reachable_refs(document, paths),
    }
}

/// Prune `components.schemas` in place. Absent schemas are a no-op.
pub fn apply_orphan_cleanup(document: &mut Value, strategy: OrphanStrategy) -> Vec<String> {
    let live = live_refs(document, strategy);

    match document
        .get_mut("components")
        .and_then(|components| components.get_mut("schemas"))
        .and_then(Value::as_object_mut)
    {
        Some(schemas) => prune_schemas(schemas, &live),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chained_document() -> Value {
        json!({
            "paths": {
                "/users": {
                    "get": {
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/UserList" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "UserList": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/User" }
                    },
                    "User": { "type": "object" },
                    "Ghost": { "type": "object" }
                }
            }
        })
    }

    fn slashed_name_document(reference: &str) -> Value {
        json!({
            "paths": {
                "/users": { "get": { "responses": { "200": { "$ref": reference } } } }
            },
            "components": {
                "schemas": {
                    "v1/User": { "properties": { "role": { "$ref": "#/components/schemas/v1/Role" } } },
                    "v1/Role": { "type": "string" },
                    "v1/Ghost": { "type": "object" }
                }
            }
        })
    }

    #[test]
    fn test_schema_ref_forms() {
        assert_eq!(schema_ref("User"), "#/components/schemas/User");
        assert_eq!(schema_ref("a/b~c"), "#/components/schemas/a/b~c");
        assert_eq!(escaped_schema_ref("a/b~c"), "#/components/schemas/a~1b~0c");
    }

    #[test]
    fn test_slashed_schema_name_referenced_verbatim() {
        let mut direct = slashed_name_document("#/components/schemas/v1/User");
        let removed = apply_orphan_cleanup(&mut direct, OrphanStrategy::Direct);
        assert_eq!(removed, vec!["v1/Role", "v1/Ghost"]);

        let mut transitive = slashed_name_document("#/components/schemas/v1/User");
        let removed = apply_orphan_cleanup(&mut transitive, OrphanStrategy::Transitive);
        assert_eq!(removed, vec!["v1/Ghost"]);
        assert!(transitive["components"]["schemas"].get("v1/Role").is_some());
    }

    #[test]
    fn test_slashed_schema_name_referenced_escaped() {
        let mut direct = slashed_name_document("#/components/schemas/v1~1User");
        let removed = apply_orphan_cleanup(&mut direct, OrphanStrategy::Direct);
        assert_eq!(removed, vec!["v1/Role", "v1/Ghost"]);

        let mut transitive = slashed_name_document("#/components/schemas/v1~1User");
        let removed = apply_orphan_cleanup(&mut transitive, OrphanStrategy::Transitive);
        assert_eq!(removed, vec!["v1/Ghost"]);
    }

    #[test]
    fn test_prune_keeps_live_schemas() {
        let mut schemas = json!({ "User": {}, "Ghost": {} }).as_object().cloned().unwrap();
        let live: HashSet<String> = [schema_ref("User")].into_iter().collect();

        let removed = prune_schemas(&mut schemas, &live);

        assert_eq!(removed, vec!["Ghost"]);
        assert_eq!(schemas.keys().collect::<Vec<_>>(), vec!["User"]);
    }

    #[test]
    fn test_direct_strategy_only_sees_paths() {
        let mut document = chained_document();

        let removed = apply_orphan_cleanup(&mut document, OrphanStrategy::Direct);

        assert_eq!(removed, vec!["User", "Ghost"]);
        let schemas = document["components"]["schemas"].as_object().unwrap();
        assert_eq!(schemas.keys().collect::<Vec<_>>(), vec!["UserList"]);
    }

    #[test]
    fn test_transitive_strategy_follows_schema_refs() {
        let mut document = chained_document();

        let removed = apply_orphan_cleanup(&mut document, OrphanStrategy::Transitive);

        assert_eq!(removed, vec!["Ghost"]);
        let schemas = document["components"]["schemas"].as_object().unwrap();
        assert_eq!(schemas.keys().collect::<Vec<_>>(), vec!["UserList", "User"]);
    }

    #[test]
    fn test_missing_schemas_is_noop() {
        let mut document = json!({ "paths": {}, "components": { "securitySchemes": {} } });
        let before = document.clone();
        assert!(apply_orphan_cleanup(&mut document, OrphanStrategy::Transitive).is_empty());
        assert_eq!(document, before);
    }

    #[test]
    fn test_missing_paths_prunes_everything() {
        let mut document = json!({ "components": { "schemas": { "User": {} } } });
        let removed = apply_orphan_cleanup(&mut document, OrphanStrategy::Direct);
        assert_eq!(removed, vec!["User"]);
        assert_eq!(document["components"]["schemas"], json!({}));
    }
}
