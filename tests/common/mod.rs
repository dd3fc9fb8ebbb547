//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use a2ui_sync::scheduler::{BatchConfig, FrameTicker, TickSource};
use a2ui_sync::session::SessionStore;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Tick source that only records what the scheduler asked for.
#[derive(Clone, Default)]
pub struct RecordingTicks {
    pub log: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingTicks {
    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().clone()
    }
}

impl TickSource for RecordingTicks {
    fn schedule(&mut self) {
        self.log.lock().push("schedule");
    }

    fn cancel(&mut self) {
        self.log.lock().push("cancel");
    }
}

/// Store driven by hand through `on_tick`/`flush`.
pub fn manual_store() -> (SessionStore, RecordingTicks) {
    let ticks = RecordingTicks::default();
    let store = SessionStore::new(BatchConfig::default(), Box::new(ticks.clone()));
    (store, ticks)
}

/// Store paced by a real frame ticker.
pub fn ticking_store(interval: Duration) -> (SessionStore, FrameTicker) {
    let ticker = FrameTicker::new(interval);
    let store = SessionStore::new(
        BatchConfig {
            frame_interval: interval,
            burst_threshold: 50,
        },
        Box::new(ticker.clone()),
    );
    (store, ticker)
}

// -- Envelope builders --------------------------------------------------------

pub fn surface_update(components: Vec<Value>) -> Value {
    json!({"surfaceUpdate": {"surfaceId": "main", "components": components}})
}

pub fn text(id: &str, value: &str) -> Value {
    json!({"id": id, "component": {"Text": {"text": {"literalString": value}}}})
}

pub fn column(id: &str, children: &[&str]) -> Value {
    json!({"id": id, "component": {"Column": {"children": {"explicitList": children}}}})
}

pub fn begin(root: &str) -> Value {
    json!({"beginRendering": {"surfaceId": "main", "root": root}})
}

pub fn data_update(path: Option<&str>, contents: Value) -> Value {
    match path {
        Some(path) => json!({"dataModelUpdate": {"surfaceId": "main", "path": path, "contents": contents}}),
        None => json!({"dataModelUpdate": {"surfaceId": "main", "contents": contents}}),
    }
}

pub fn delete() -> Value {
    json!({"deleteSurface": {"surfaceId": "main"}})
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
