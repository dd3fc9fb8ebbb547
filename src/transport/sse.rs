//! SSE (Server-Sent Events) framing for the chat stream.
//!
//! Handles format variations (e.g. `data:{...}` vs `data: {...}`) and
//! payloads split across network chunks.

use serde_json::Value;

/// Payload marking the end of a turn's stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One decoded event payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The end-of-stream sentinel.
    Done,
    /// A JSON protocol message.
    Message(Value),
}

impl Frame {
    /// Interpret an event payload.
    ///
    /// The sentinel is checked before any JSON parsing so that it is never
    /// reported as malformed.
    pub fn parse(data: &str) -> Result<Self, serde_json::Error> {
        let data = data.trim();
        if data == DONE_SENTINEL {
            return Ok(Frame::Done);
        }
        serde_json::from_str(data).map(Frame::Message)
    }
}

/// Incremental SSE decoder.
///
/// Feed it raw body chunks; it returns the `data` payload of every event
/// completed by that chunk. Multiple `data:` lines in one event are joined
/// with `\n`. `event:`, `id:`, `retry:` and comment lines are skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    /// Prefix of `buffer` already known to hold no line terminator.
    scanned: usize,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') {
            let end = self.scanned + offset;
            let line = String::from_utf8_lossy(&self.buffer[start..end]).into_owned();
            if let Some(event) = self.feed_line(line.trim_end_matches('\r')) {
                events.push(event);
            }
            start = end + 1;
            self.scanned = start;
        }

        self.buffer.drain(..start);
        self.scanned = self.buffer.len();
        events
    }

    /// Flush whatever is buffered once the body has ended.
    pub fn finish(&mut self) -> Option<String> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.scanned = 0;
            let line = String::from_utf8_lossy(&rest).into_owned();
            if let Some(event) = self.feed_line(line.trim_end_matches('\r')) {
                return Some(event);
            }
        }
        self.dispatch()
    }

    fn feed_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if let Some(data) = line.strip_prefix("data:") {
            let data = data.strip_prefix(' ').unwrap_or(data);
            self.data.push(data.to_string());
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        let event = self.data.join("\n");
        self.data.clear();
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_standard_format() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data: {\"beginRendering\": {}}\n\n");
        assert_eq!(events, vec!["{\"beginRendering\": {}}".to_string()]);
    }

    #[test]
    fn parses_compact_format() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data:{\"a\":1}\n\n");
        assert_eq!(events, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn reassembles_events_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"surf").is_empty());
        assert!(decoder.push(b"aceUpdate\": {}}\r\n").is_empty());
        let events = decoder.push(b"\r\n");
        assert_eq!(events, vec!["{\"surfaceUpdate\": {}}".to_string()]);
    }

    #[test]
    fn long_line_fed_byte_by_byte_is_reassembled() {
        let payload = format!("{{\"text\": \"{}\"}}", "x".repeat(4096));
        let wire = format!("data: {}\n\n", payload);
        let mut decoder = SseDecoder::new();

        let mut events = Vec::new();
        for byte in wire.as_bytes() {
            events.extend(decoder.push(std::slice::from_ref(byte)));
        }

        assert_eq!(events, vec![payload]);
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn only_one_leading_space_is_dropped() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data:   indented\ndata:\ttab\n\n");
        assert_eq!(events, vec!["  indented\n\ttab".to_string()]);
    }

    #[test]
    fn skips_non_data_lines() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"event: message\nid: 7\n: keepalive\ndata: 1\n\n");
        assert_eq!(events, vec!["1".to_string()]);
    }

    #[test]
    fn joins_multiline_data() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data: {\"a\":\ndata: 2}\n\n");
        assert_eq!(events, vec!["{\"a\":\n2}".to_string()]);
        assert_eq!(Frame::parse(&events[0]).ok(), Some(Frame::Message(json!({"a": 2}))));
    }

    #[test]
    fn finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish().as_deref(), Some("[DONE]"));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn done_sentinel_is_recognised_before_json() {
        assert_eq!(Frame::parse("[DONE]").ok(), Some(Frame::Done));
        assert_eq!(Frame::parse(" [DONE] ").ok(), Some(Frame::Done));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(Frame::parse("{not json").is_err());
    }
}
