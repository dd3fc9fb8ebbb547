//! Conversation turns and the store that owns their surfaces.

mod error;
mod id;
mod store;

pub use error::SessionError;
pub use id::SessionId;
pub use store::{RenderNotice, Session, SessionStore};
