//! `$ref` collection over the document tree

use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use crate::orphans::SCHEMA_REF_PREFIX;

pub const REF_KEY: &str = "$ref";

/// Collect every string stored under a `$ref` key, at any depth.
pub fn collect_refs(value: &Value) -> HashSet<String> {
    let mut refs = HashSet::new();
    visit_refs(value, &mut |reference| {
        refs.insert(reference.to_string());
    });
    refs
}

fn visit_refs<F>(value: &Value, on_ref: &mut F)
where
    F: FnMut(&str),
{
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == REF_KEY {
                    if let Some(reference) = child.as_str() {
                        on_ref(reference);
                    }
                }
                visit_refs(child, on_ref);
            }
        }
        Value::Array(items) => {
            for item in items {
                visit_refs(item, on_ref);
            }
        }
        _ => {}
    }
}

/// Resolve a local reference (`#/components/schemas/User`) to its target.
///
/// Schema refs that do not resolve as a JSON pointer are retried with the rest
/// of the ref taken as a literal schema name, so `#/components/schemas/v1/User`
/// finds the schema `v1/User`.
pub fn resolve_local<'a>(document: &'a Value, reference: &str) -> Option<&'a Value> {
    let pointer = reference.strip_prefix('#')?;
    if pointer.is_empty() {
        return Some(document);
    }
    document.pointer(pointer).or_else(|| {
        let name = reference.strip_prefix(SCHEMA_REF_PREFIX)?;
        document.get("components")?.get("schemas")?.get(name)
    })
}

/// Collect the refs found under `root`, then follow each local ref into the
/// document and collect from its target as well, until nothing new turns up.
pub fn reachable_refs(document: &Value, root: &Value) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut pending: Vec<String> = collect_refs(root).into_iter().collect();

    while let Some(reference) = pending.pop() {
        if !seen.insert(reference.clone()) {
            continue;
        }

        match resolve_local(document, &reference) {
            Some(target) => {
                visit_refs(target, &mut |next| {
                    if !seen.contains(next) {
                        pending.push(next.to_string());
                    }
                });
            }
            None => debug!("Reference {} does not resolve inside the document", reference),
        }
    }

    seen
}
