//! Decoding of generator protocol envelopes.
//!
//! Decoding is lenient: fields with the wrong shape are
//! treated as absent so a sloppy generator degrades to a partial update
//! instead of a dropped one.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::mvi::Intent;

/// The four recognised top-level keys, in the order they are applied when
/// a single message carries more than one.
pub const RECOGNIZED_KEYS: [&str; 4] = [
    "surfaceUpdate",
    "dataModelUpdate",
    "deleteSurface",
    "beginRendering",
];

/// Key of the wrapper that carries an ordered list of envelopes.
pub const BATCH_KEY: &str = "a2ui";

#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    #[error("Envelope is not a JSON object")]
    NotAnObject,

    #[error("Envelope has none of the recognised keys (found: {keys:?})")]
    NoRecognizedKey { keys: Vec<String> },
}

/// One protocol message addressed to a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    SurfaceUpdate(SurfaceUpdate),
    DataModelUpdate(DataModelUpdate),
    DeleteSurface(DeleteSurface),
    BeginRendering(BeginRendering),
}

impl Intent for Envelope {}

/// Stage component definitions. Components stay raw until validated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceUpdate {
    pub surface_id: Option<String>,
    pub components: Vec<Value>,
}

/// Stage data-model entries, optionally under a path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataModelUpdate {
    pub surface_id: Option<String>,
    pub path: Option<String>,
    /// `None` when the message carried no usable `contents` array.
    pub contents: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteSurface {
    pub surface_id: Option<String>,
}

/// Commit staged state and point the surface at `root`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeginRendering {
    pub surface_id: Option<String>,
    pub root: Option<String>,
}

impl Envelope {
    /// Wire name of the message kind.
    pub fn name(&self) -> &'static str {
        match self {
            Envelope::SurfaceUpdate(_) => "surfaceUpdate",
            Envelope::DataModelUpdate(_) => "dataModelUpdate",
            Envelope::DeleteSurface(_) => "deleteSurface",
            Envelope::BeginRendering(_) => "beginRendering",
        }
    }
}

/// Split a frame into its envelopes.
///
/// `{"a2ui": [...]}` yields its items in order; anything else is a single
/// envelope.
pub fn unwrap_batch(frame: Value) -> Vec<Value> {
    match frame {
        Value::Object(mut fields) if fields.get(BATCH_KEY).is_some_and(Value::is_array) => {
            match fields.remove(BATCH_KEY) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        other => vec![other],
    }
}

/// Decode one raw envelope.
///
/// A well-formed envelope carries exactly one recognised key. Messages
/// carrying several are accepted and yield one [`Envelope`] per key in
/// [`RECOGNIZED_KEYS`] order. `null` and `false` bodies count as absent.
pub fn decode(message: Value) -> Result<Vec<Envelope>, ProtocolError> {
    let Value::Object(mut fields) = message else {
        return Err(ProtocolError::NotAnObject);
    };

    let mut envelopes = Vec::new();
    for key in RECOGNIZED_KEYS {
        if let Some(body) = take_present(&mut fields, key) {
            envelopes.extend(decode_body(key, body));
        }
    }

    if envelopes.is_empty() {
        return Err(ProtocolError::NoRecognizedKey {
            keys: fields.keys().cloned().collect(),
        });
    }
    if envelopes.len() > 1 {
        tracing::debug!(count = envelopes.len(), "Envelope carries several message kinds");
    }

    Ok(envelopes)
}

fn decode_body(key: &str, body: Value) -> Option<Envelope> {
    let mut body = match body {
        Value::Object(body) => body,
        _ => Map::new(),
    };
    let surface_id = str_field(&body, "surfaceId");

    let envelope = match key {
        "surfaceUpdate" => Envelope::SurfaceUpdate(SurfaceUpdate {
            surface_id,
            components: match body.remove("components") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
        }),
        "dataModelUpdate" => Envelope::DataModelUpdate(DataModelUpdate {
            surface_id,
            path: str_field(&body, "path").filter(|p| !p.is_empty()),
            contents: match body.remove("contents") {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
        }),
        "deleteSurface" => Envelope::DeleteSurface(DeleteSurface { surface_id }),
        "beginRendering" => Envelope::BeginRendering(BeginRendering {
            surface_id,
            root: str_field(&body, "root"),
        }),
        _ => return None,
    };
    Some(envelope)
}

fn take_present(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    match fields.remove(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(body) => Some(body),
    }
}

fn str_field(body: &Map<String, Value>, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}
