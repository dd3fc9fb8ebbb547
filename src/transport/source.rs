use async_trait::async_trait;

use super::{Frame, TransportError};

/// An ordered stream of frames for one turn.
///
/// `Ok(None)` means the body ended without a sentinel.
#[async_trait]
pub trait FrameSource: Send {
    async fn next_frame(&mut self) -> Result<Option<Frame>, TransportError>;
}
