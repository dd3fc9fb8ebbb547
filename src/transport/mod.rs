//! Delivery of protocol frames from the generator.
//!
//! The live path POSTs to the chat endpoint and decodes the SSE body; the
//! replay path reads a capture file. Both yield [`Frame`]s through
//! [`FrameSource`].

mod client;
mod error;
mod replay;
mod source;
mod sse;

pub use client::{ChatClient, ChatStream};
pub use error::TransportError;
pub use replay::ReplaySource;
pub use source::FrameSource;
pub use sse::{Frame, SseDecoder, DONE_SENTINEL};
