//! Declarative table of where each kind keeps its child references.
//!
//! `children` is never stored on the wire; it is derived from properties
//! by walking the paths listed here. Both the validator and the renderer
//! go through [`extract_children`], so this table is the only place that
//! knows which property names hold child ids.

use serde_json::{Map, Value};

use super::kind::ComponentKind;

/// One location in a property map that holds child id(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildPath {
    /// An ordered array of ids at the given path.
    List(&'static [&'static str]),
    /// A single id at the given path.
    Single(&'static [&'static str]),
    /// An array of entries at the given path, each holding one id under the key.
    PerEntry(&'static [&'static str], &'static str),
}

const EXPLICIT_LIST: &[ChildPath] = &[ChildPath::List(&["children", "explicitList"])];
const SINGLE_CHILD: &[ChildPath] = &[ChildPath::Single(&["child"])];
const BRANCHES: &[ChildPath] = &[
    ChildPath::Single(&["thenChild"]),
    ChildPath::Single(&["elseChild"]),
];
const MODAL_SLOTS: &[ChildPath] = &[
    ChildPath::Single(&["entryPointChild"]),
    ChildPath::Single(&["contentChild"]),
];
const TAB_CHILDREN: &[ChildPath] = &[ChildPath::PerEntry(&["tabs"], "child")];

/// Child paths for a kind, in the order children are listed.
pub fn child_paths(kind: ComponentKind) -> &'static [ChildPath] {
    match kind {
        ComponentKind::Column | ComponentKind::Row | ComponentKind::List => EXPLICIT_LIST,
        ComponentKind::Card | ComponentKind::Button => SINGLE_CHILD,
        ComponentKind::Conditional => BRANCHES,
        ComponentKind::Modal => MODAL_SLOTS,
        ComponentKind::Tabs => TAB_CHILDREN,
        _ => &[],
    }
}

/// Derive the ordered child ids of a component from its properties.
///
/// Ids that are not strings are skipped.
pub fn extract_children(kind: ComponentKind, properties: &Map<String, Value>) -> Vec<String> {
    let mut children = Vec::new();

    for path in child_paths(kind) {
        match path {
            ChildPath::List(segments) => {
                if let Some(Value::Array(ids)) = lookup(properties, segments) {
                    children.extend(ids.iter().filter_map(child_id));
                }
            }
            ChildPath::Single(segments) => {
                if let Some(id) = lookup(properties, segments).and_then(child_id) {
                    children.push(id);
                }
            }
            ChildPath::PerEntry(segments, key) => {
                if let Some(Value::Array(entries)) = lookup(properties, segments) {
                    children.extend(
                        entries
                            .iter()
                            .filter_map(|entry| entry.get(*key))
                            .filter_map(child_id),
                    );
                }
            }
        }
    }

    children
}

fn lookup<'a>(properties: &'a Map<String, Value>, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = properties.get(*first)?;
    for segment in rest {
        current = current.get(*segment)?;
    }
    Some(current)
}

fn child_id(value: &Value) -> Option<String> {
    match value.as_str() {
        Some(id) if !id.is_empty() => Some(id.to_string()),
        _ => None,
    }
}
