//! Model-View-Intent (MVI) primitives for the surface store.
//!
//! # Architecture
//!
//! ```text
//! Envelope ──→ Reducer ──→ SurfaceState ──→ Renderer
//!    ↑                                        │
//!    └──────────── generator stream ──────────┘
//! ```
//!
//! - **State**: self-contained value holding everything a renderer reads
//! - **Intent**: one decoded protocol message
//! - **Reducer**: the only place state transitions happen

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
