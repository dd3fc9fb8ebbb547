use thiserror::Error;

/// Errors raised while talking to the chat endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Failed to reach the endpoint
    #[error("Connection failed to '{endpoint}': {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Reading the response body failed midway
    #[error("Failed to read response stream: {0}")]
    Read(#[source] reqwest::Error),

    /// The stream stalled
    #[error("Idle timeout after {duration}s of inactivity")]
    IdleTimeout { duration: u64 },

    /// A replay capture could not be read
    #[error("Failed to read capture: {0}")]
    Io(#[from] std::io::Error),
}
