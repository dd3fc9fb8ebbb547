//! Walking the committed component tree from the root.

use std::collections::HashSet;

use crate::component::ComponentNode;

use super::state::SurfaceState;

/// A committed node together with its depth below the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEntry<'a> {
    pub depth: usize,
    pub node: &'a ComponentNode,
}

/// Committed nodes reachable from the root, depth-first, pre-order.
///
/// Ids that are not committed are skipped (they render as empty). A node
/// that is already an ancestor on the current path is not entered again,
/// so cyclic references terminate.
pub fn render_order(state: &SurfaceState) -> Vec<TreeEntry<'_>> {
    let mut out = Vec::new();
    if let Some(root) = state.root_id.as_deref() {
        let mut ancestors = HashSet::new();
        visit(state, root, 0, &mut ancestors, &mut out);
    }
    out
}

fn visit<'a>(
    state: &'a SurfaceState,
    id: &'a str,
    depth: usize,
    ancestors: &mut HashSet<&'a str>,
    out: &mut Vec<TreeEntry<'a>>,
) {
    let Some(node) = state.committed.get(id) else {
        return;
    };
    if !ancestors.insert(id) {
        tracing::debug!(id = %id, "Skipping cyclic child reference");
        return;
    }

    out.push(TreeEntry { depth, node });
    for child in &node.children {
        visit(state, child, depth + 1, ancestors, out);
    }

    ancestors.remove(id);
}
