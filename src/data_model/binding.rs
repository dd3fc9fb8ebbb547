//! Resolution of literal and data-bound property values.

use serde_json::Value;

use super::path::get_at_path;

/// Resolve a property value against a data model.
///
/// `{literalString|literalNumber|literalBoolean: v}` resolves to `v`,
/// `{path: "/a/b"}` resolves to whatever the model holds at that path.
/// Anything else is not a bound value and resolves to `None`.
pub fn resolve_bound(value: &Value, model: &Value) -> Option<Value> {
    let object = value.as_object()?;

    for key in ["literalString", "literalNumber", "literalBoolean"] {
        if let Some(literal) = object.get(key) {
            return Some(literal.clone());
        }
    }

    let path = object.get("path")?.as_str()?;
    get_at_path(model, path).cloned()
}
