//! Offline frame source reading a captured stream.

use std::collections::VecDeque;
use std::path::Path;

use async_trait::async_trait;

use super::sse::Frame;
use super::{FrameSource, TransportError};

/// Frames read from a capture file.
///
/// Each non-blank line is one frame, either raw JSON or an SSE `data:`
/// line. Lines that do not parse are skipped.
#[derive(Debug, Default)]
pub struct ReplaySource {
    frames: VecDeque<Frame>,
}

impl ReplaySource {
    pub fn from_text(text: &str) -> Self {
        let mut frames = VecDeque::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            let data = line.strip_prefix("data:").unwrap_or(line);
            match Frame::parse(data) {
                Ok(frame) => frames.push_back(frame),
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "Skipping unparseable capture line")
                }
            }
        }
        Self { frames }
    }

    pub fn from_path(path: &Path) -> Result<Self, TransportError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[async_trait]
impl FrameSource for ReplaySource {
    async fn next_frame(&mut self) -> Result<Option<Frame>, TransportError> {
        Ok(self.frames.pop_front())
    }
}
