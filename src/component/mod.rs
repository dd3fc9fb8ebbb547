//! Component payload validation and repair.
//!
//! A generator emits components as `{id, component: {<Kind>: {...props}}}`.
//! This module turns those payloads into [`ComponentNode`]s: legacy field
//! shapes are repaired, the kind is checked against a closed set, and the
//! child references are derived from a declarative table.

mod children;
mod kind;
mod repair;
mod validate;

use serde_json::{Map, Value};

pub use children::{child_paths, extract_children, ChildPath};
pub use kind::{ComponentKind, NodeKind};
pub use repair::{literal, repair};
pub use validate::validate;

/// One renderable unit of a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    /// Unique key within a surface.
    pub id: String,
    pub kind: NodeKind,
    /// Open property map, after repair.
    pub properties: Map<String, Value>,
    /// Child ids derived from `properties`, never read from the wire.
    pub children: Vec<String>,
}

impl ComponentNode {
    /// Kind the renderer should draw for this node.
    pub fn rendered_kind(&self) -> ComponentKind {
        self.kind.rendered_as()
    }
}
