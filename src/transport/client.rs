//! HTTP client for the chat endpoint.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tokio::time::{timeout_at, Instant};

use super::sse::{Frame, SseDecoder};
use super::{FrameSource, TransportError};
use crate::config::TransportConfig;

/// POSTs a chat message and streams back the generator's frames.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    idle_timeout: Duration,
}

impl ChatClient {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            idle_timeout: Duration::from_secs(config.idle_timeout_seconds.into()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Open the stream for one turn.
    ///
    /// # Errors
    /// `Connect` if the request cannot be sent, `Status` for a non-2xx
    /// response (the body is read for the message).
    pub async fn open(&self, message: &str) -> Result<ChatStream, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| TransportError::Connect {
                endpoint: self.endpoint.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(endpoint = %self.endpoint, status = status.as_u16(), "Chat stream opened");

        Ok(ChatStream {
            response,
            decoder: SseDecoder::new(),
            ready: VecDeque::new(),
            idle_timeout: self.idle_timeout,
            last_activity: Instant::now(),
            ended: false,
        })
    }
}

/// Frames of one open response body.
pub struct ChatStream {
    response: reqwest::Response,
    decoder: SseDecoder,
    ready: VecDeque<Frame>,
    idle_timeout: Duration,
    last_activity: Instant,
    ended: bool,
}

impl ChatStream {
    fn queue_event(&mut self, data: &str) {
        match Frame::parse(data) {
            Ok(frame) => self.ready.push_back(frame),
            Err(e) => tracing::warn!(error = %e, "Skipping frame that is not valid JSON"),
        }
    }
}

#[async_trait]
impl FrameSource for ChatStream {
    async fn next_frame(&mut self) -> Result<Option<Frame>, TransportError> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Ok(Some(frame));
            }
            if self.ended {
                return Ok(None);
            }

            let deadline = self.last_activity + self.idle_timeout;
            let chunk = timeout_at(deadline, self.response.chunk())
                .await
                .map_err(|_| TransportError::IdleTimeout {
                    duration: self.idle_timeout.as_secs(),
                })?
                .map_err(TransportError::Read)?;

            self.last_activity = Instant::now();
            match chunk {
                Some(bytes) => {
                    for event in self.decoder.push(&bytes) {
                        self.queue_event(&event);
                    }
                }
                None => {
                    self.ended = true;
                    if let Some(event) = self.decoder.finish() {
                        self.queue_event(&event);
                    }
                }
            }
        }
    }
}
