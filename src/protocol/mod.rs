//! Wire protocol spoken by the remote UI generator.
//!
//! A frame is either one envelope or an `{"a2ui": [...]}` batch of them.
//! Each envelope carries one of `surfaceUpdate`, `dataModelUpdate`,
//! `deleteSurface`, or `beginRendering`.

mod envelope;

pub use envelope::{
    decode, unwrap_batch, BeginRendering, DataModelUpdate, DeleteSurface, Envelope, ProtocolError,
    SurfaceUpdate, BATCH_KEY, RECOGNIZED_KEYS,
};
