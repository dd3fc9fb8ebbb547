//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents are the messages a reducer consumes. Here they are decoded
/// protocol envelopes produced by a remote generator.
pub trait Intent: Send + 'static {}
