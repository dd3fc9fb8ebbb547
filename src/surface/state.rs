//! Committed and staged state of one surface.

use std::collections::HashMap;

use serde_json::Value;

use crate::component::ComponentNode;
use crate::data_model::{empty_tree, get_at_path};
use crate::mvi::UiState;

/// Where a surface is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePhase {
    /// Nothing committed, nothing staged.
    Empty,
    /// Staged changes waiting for `beginRendering`, nothing committed yet.
    Staged,
    /// Has rendered content.
    Committed,
}

/// Component set, data model, root pointer, and render version of one
/// surface.
///
/// Readers only ever look at the committed half. Pending components and
/// data become visible together on the next `beginRendering`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    pub committed: HashMap<String, ComponentNode>,
    pub pending: HashMap<String, ComponentNode>,
    pub data_model: Value,
    pub pending_data_model: Value,
    pub root_id: Option<String>,
    /// Bumped by exactly one on every commit and every delete.
    pub render_version: u64,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            committed: HashMap::new(),
            pending: HashMap::new(),
            data_model: empty_tree(),
            pending_data_model: empty_tree(),
            root_id: None,
            render_version: 0,
        }
    }
}

impl UiState for SurfaceState {}

impl SurfaceState {
    pub fn phase(&self) -> SurfacePhase {
        if self.root_id.is_some() || !self.committed.is_empty() {
            SurfacePhase::Committed
        } else if self.has_staged_changes() {
            SurfacePhase::Staged
        } else {
            SurfacePhase::Empty
        }
    }

    /// Whether anything is waiting for the next commit.
    pub fn has_staged_changes(&self) -> bool {
        !self.pending.is_empty() || !is_empty_tree(&self.pending_data_model)
    }

    /// Committed component by id.
    pub fn component(&self, id: &str) -> Option<&ComponentNode> {
        self.committed.get(id)
    }

    /// Committed data-model value at `path`.
    pub fn data_at_path(&self, path: &str) -> Option<&Value> {
        get_at_path(&self.data_model, path)
    }
}

fn is_empty_tree(tree: &Value) -> bool {
    tree.as_object().map_or(true, |map| map.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::validate;
    use serde_json::json;

    #[test]
    fn default_is_empty() {
        let state = SurfaceState::default();
        assert_eq!(state.phase(), SurfacePhase::Empty);
        assert_eq!(state.render_version, 0);
        assert_eq!(state.data_model, json!({}));
        assert!(state.root_id.is_none());
    }

    #[test]
    fn pending_components_make_it_staged() {
        let mut state = SurfaceState::default();
        let node = validate(json!({"id": "a", "component": {"Divider": {}}})).expect("node");
        state.pending.insert(node.id.clone(), node);
        assert_eq!(state.phase(), SurfacePhase::Staged);
        assert!(state.component("a").is_none());
    }

    #[test]
    fn pending_data_makes_it_staged() {
        let state = SurfaceState {
            pending_data_model: json!({"k": 1}),
            ..SurfaceState::default()
        };
        assert_eq!(state.phase(), SurfacePhase::Staged);
        assert!(state.data_at_path("k").is_none());
    }

    #[test]
    fn root_makes_it_committed() {
        let state = SurfaceState {
            root_id: Some("root".to_string()),
            ..SurfaceState::default()
        };
        assert_eq!(state.phase(), SurfacePhase::Committed);
    }
}
