use thiserror::Error;

use super::SessionId;
use crate::transport::TransportError;

/// Errors raised at the session boundary.
///
/// Malformed protocol input never shows up here; it is logged and dropped
/// where it is found.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A turn is already streaming in session {session}")]
    TurnInProgress { session: SessionId },

    #[error("Refusing to send an empty message")]
    EmptyMessage,

    #[error("Unknown session {session}")]
    UnknownSession { session: SessionId },

    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),
}
