//! Reducer applying protocol envelopes to a surface.

use crate::component::validate;
use crate::data_model::{deep_merge, empty_tree, entries_to_map, parse_entries, set_at_path};
use crate::mvi::Reducer;
use crate::protocol::{BeginRendering, DataModelUpdate, Envelope, SurfaceUpdate};

use super::state::SurfaceState;

/// Reducer for surface state transitions.
///
/// `surfaceUpdate` and `dataModelUpdate` only touch the staged half.
/// `beginRendering` promotes everything staged in one step, and
/// `deleteSurface` wipes both halves. Only those two bump the render
/// version.
pub struct SurfaceReducer;

impl Reducer for SurfaceReducer {
    type State = SurfaceState;
    type Intent = Envelope;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            Envelope::SurfaceUpdate(update) => stage_components(state, update),
            Envelope::DataModelUpdate(update) => stage_data(state, update),
            Envelope::BeginRendering(begin) => commit(state, begin),
            Envelope::DeleteSurface(_) => SurfaceState {
                render_version: state.render_version + 1,
                ..SurfaceState::default()
            },
        }
    }
}

fn stage_components(mut state: SurfaceState, update: SurfaceUpdate) -> SurfaceState {
    for raw in update.components {
        match validate(raw) {
            Some(node) => {
                state.pending.insert(node.id.clone(), node);
            }
            None => {
                tracing::warn!(
                    surface = update.surface_id.as_deref().unwrap_or("-"),
                    "Dropping component without id or component payload"
                );
            }
        }
    }
    state
}

fn stage_data(mut state: SurfaceState, update: DataModelUpdate) -> SurfaceState {
    let Some(contents) = update.contents else {
        tracing::warn!("Ignoring dataModelUpdate without a contents list");
        return state;
    };

    let tree = entries_to_map(&parse_entries(&contents));
    match update.path {
        Some(path) => set_at_path(&mut state.pending_data_model, &path, tree),
        None => deep_merge(&mut state.pending_data_model, tree.into()),
    }
    state
}

fn commit(mut state: SurfaceState, begin: BeginRendering) -> SurfaceState {
    state.committed.extend(state.pending.drain());

    let pending_data = std::mem::replace(&mut state.pending_data_model, empty_tree());
    deep_merge(&mut state.data_model, pending_data);

    let previous_root = std::mem::replace(&mut state.root_id, begin.root);
    state.render_version += 1;

    if previous_root != state.root_id {
        tracing::info!(
            render_version = state.render_version,
            previous_root = previous_root.as_deref().unwrap_or("null"),
            root = state.root_id.as_deref().unwrap_or("null"),
            components = state.committed.len(),
            "Render root switched"
        );
    }

    state
}
