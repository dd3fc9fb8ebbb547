//! Runs one conversation turn from first frame to loading-flag clear.
//!
//! Frames and display-frame ticks are multiplexed on a single task, so the
//! queue and the surfaces are only ever touched from one place at a time.

use tokio::time::Instant;

use crate::scheduler::FrameTicker;
use crate::session::{SessionError, SessionId, SessionStore};
use crate::transport::{ChatClient, Frame, FrameSource, TransportError};

/// Send `message` to the chat endpoint and apply the streamed reply.
///
/// Transport failures do not surface as `Err`: they are recorded on the
/// session and whatever was committed before the failure stays visible.
///
/// # Errors
/// `EmptyMessage` for blank input, `TurnInProgress` if another turn is
/// still loading.
pub async fn stream_turn(
    store: &SessionStore,
    ticker: &FrameTicker,
    client: &ChatClient,
    message: &str,
) -> Result<SessionId, SessionError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(SessionError::EmptyMessage);
    }

    let session = store.begin_turn()?;
    let guard = TurnGuard::new(store, session);
    let result = match client.open(message).await {
        Ok(mut stream) => pump(store, ticker, session, &mut stream).await,
        Err(e) => Err(e),
    };
    guard.complete(result)?;
    Ok(session)
}

/// Apply a turn read from any frame source, e.g. a replayed capture.
pub async fn replay_turn(
    store: &SessionStore,
    ticker: &FrameTicker,
    source: &mut dyn FrameSource,
) -> Result<SessionId, SessionError> {
    let session = store.begin_turn()?;
    let guard = TurnGuard::new(store, session);
    let result = pump(store, ticker, session, source).await;
    guard.complete(result)?;
    Ok(session)
}

async fn pump<S: FrameSource + ?Sized>(
    store: &SessionStore,
    ticker: &FrameTicker,
    session: SessionId,
    source: &mut S,
) -> Result<(), TransportError> {
    let mut frames = 0usize;
    loop {
        tokio::select! {
            frame = source.next_frame() => match frame? {
                Some(Frame::Message(message)) => {
                    frames += 1;
                    store.enqueue(session, message);
                }
                Some(Frame::Done) => {
                    tracing::debug!(session = %session, frames, "Stream finished");
                    return Ok(());
                }
                None => {
                    tracing::debug!(session = %session, frames, "Stream closed without sentinel");
                    return Ok(());
                }
            },
            now = ticker.wait() => {
                store.on_tick(now);
            }
        }
    }
}

/// Ends the turn even when the turn future is dropped before completing.
struct TurnGuard<'a> {
    store: &'a SessionStore,
    session: SessionId,
    armed: bool,
}

impl<'a> TurnGuard<'a> {
    fn new(store: &'a SessionStore, session: SessionId) -> Self {
        Self {
            store,
            session,
            armed: true,
        }
    }

    fn complete(mut self, result: Result<(), TransportError>) -> Result<(), SessionError> {
        self.armed = false;
        finish(self.store, self.session, result.err().map(|e| e.to_string()))
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(session = %self.session, "Turn cancelled before the stream ended");
        let _ = finish(self.store, self.session, Some(CANCELLED.to_string()));
    }
}

/// Error recorded on a session whose turn was dropped mid-stream.
pub const CANCELLED: &str = "Turn cancelled before the stream ended";

/// Force-flush the queue, then clear the loading flag.
fn finish(store: &SessionStore, session: SessionId, error: Option<String>) -> Result<(), SessionError> {
    let applied = store.flush(Instant::now());
    if applied > 0 {
        tracing::debug!(session = %session, applied, "Flushed residual envelopes");
    }
    store.finish_turn(session, error)
}
