//! Per-turn surface state and the reducer that mutates it.

mod reducer;
mod state;
mod tree;

pub use reducer::SurfaceReducer;
pub use state::{SurfacePhase, SurfaceState};
pub use tree::{render_order, TreeEntry};
