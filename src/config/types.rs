use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scheduler::BatchConfig;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Where the chat stream comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Chat endpoint receiving `{"message": ...}` POSTs.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Idle timeout for the streaming body in seconds (default: 60).
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u32,
}

/// Frame pacing for applying streamed envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Minimum spacing between drains in milliseconds (default: 16).
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    /// Queue length that bypasses throttling (default: 50).
    #[serde(default = "default_burst_threshold")]
    pub burst_threshold: usize,
}

impl SchedulerConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            frame_interval: self.frame_interval(),
            burst_threshold: self.burst_threshold,
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000/api/chat".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_idle_timeout() -> u32 {
    60
}

fn default_frame_interval() -> u64 {
    16
}

fn default_burst_threshold() -> usize {
    50
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval(),
            burst_threshold: default_burst_threshold(),
        }
    }
}
