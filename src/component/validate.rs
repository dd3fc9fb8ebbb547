//! Turning raw component payloads into [`ComponentNode`]s.

use serde_json::{json, Map, Value};

use super::children::extract_children;
use super::kind::{ComponentKind, NodeKind};
use super::repair::{literal, repair};
use super::ComponentNode;

/// Validate a raw `{id, component: {<Kind>: {...}}}` payload.
///
/// Returns `None` when `id` or `component` is missing (or not usable).
/// Unknown kinds are not dropped: they become a caption `Text` node that
/// shows the bracketed kind name.
pub fn validate(raw: Value) -> Option<ComponentNode> {
    let id = raw.get("id").and_then(Value::as_str).filter(|id| !id.is_empty())?;
    let id = id.to_string();
    let has_component = raw
        .get("component")
        .and_then(Value::as_object)
        .is_some_and(|component| !component.is_empty());
    if !has_component {
        return None;
    }

    let mut repaired = repair(raw);
    let component = repaired.get_mut("component").and_then(Value::as_object_mut)?;
    let (kind_name, props) = component.iter_mut().next()?;
    let properties = match props.take() {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    match ComponentKind::from_name(kind_name) {
        Some(kind) => {
            let children = extract_children(kind, &properties);
            Some(ComponentNode {
                id,
                kind: NodeKind::Known(kind),
                properties,
                children,
            })
        }
        None => {
            tracing::warn!(id = %id, kind = %kind_name, "Unknown component kind, substituting placeholder");
            Some(placeholder(id, kind_name.clone(), properties))
        }
    }
}

fn placeholder(id: String, kind: String, raw_properties: Map<String, Value>) -> ComponentNode {
    let mut properties = Map::new();
    properties.insert("text".to_string(), literal(format!("[{}]", kind)));
    properties.insert("usageHint".to_string(), json!("caption"));

    ComponentNode {
        id,
        kind: NodeKind::Unknown {
            kind,
            raw_properties,
        },
        properties,
        children: Vec::new(),
    }
}
