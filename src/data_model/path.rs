//! Slash-delimited path operations on the data-model tree.
//!
//! The tree is a `serde_json::Value` whose root is always an object.
//! Paths like `/user/profile` or `user/profile/` address nested maps;
//! empty segments are ignored, so `""` and `"/"` both mean the root.

use serde_json::{Map, Value};

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Recursively merge `source` into `target`.
///
/// Nested maps merge key by key, creating missing (or non-map) targets as
/// empty maps first. Every other value, arrays included, replaces the
/// target wholesale.
pub fn deep_merge(target: &mut Value, source: Value) {
    let Value::Object(source) = source else {
        *target = source;
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        for (key, value) in source {
            if value.is_object() {
                deep_merge(map.entry(key).or_insert(Value::Null), value);
            } else {
                map.insert(key, value);
            }
        }
    }
}

/// Copy every key of `value` onto the node at `path`, creating maps along
/// the way.
///
/// Keys are merged onto the existing node rather than replacing it, so
/// repeated writes to the same path accumulate. Intermediate values that
/// are not maps are replaced by empty maps.
pub fn set_at_path(tree: &mut Value, path: &str, value: Map<String, Value>) {
    let mut current = tree;
    for segment in segments(path) {
        current = child_map(current).entry(segment.to_string()).or_insert(Value::Null);
    }

    child_map(current).extend(value);
}

/// Read the value at `path`. Returns `None` if a segment is missing or a
/// non-map value is reached before the path is exhausted.
pub fn get_at_path<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = tree;
    for segment in segments(path) {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Coerce `value` into a map and borrow it.
fn child_map(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just coerced to an object"),
    }
}
