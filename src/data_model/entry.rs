//! Data-model entries as they arrive in `dataModelUpdate.contents`.
//!
//! On the wire each entry is `{key, valueString | valueNumber |
//! valueBoolean | valueMap}`. Entries are decoded one at a time into a
//! tagged [`DataValue`]; an entry that carries none of the variants (or
//! has no key) is skipped without affecting its siblings.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// A decoded entry value.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    String(String),
    Number(Number),
    Boolean(bool),
    Map(Vec<DataEntry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataEntry {
    pub key: String,
    pub value: DataValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    key: String,
    #[serde(default)]
    value_string: Option<String>,
    #[serde(default)]
    value_number: Option<Number>,
    #[serde(default)]
    value_boolean: Option<bool>,
    #[serde(default)]
    value_map: Option<Vec<Value>>,
}

/// Decode wire entries, skipping any that are malformed.
///
/// When several variants are present the first in the order string,
/// number, boolean, map wins.
pub fn parse_entries(contents: &[Value]) -> Vec<DataEntry> {
    contents.iter().filter_map(parse_entry).collect()
}

fn parse_entry(raw: &Value) -> Option<DataEntry> {
    let entry = match RawEntry::deserialize(raw) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!(error = %err, "Skipping malformed data model entry");
            return None;
        }
    };

    let value = if let Some(s) = entry.value_string {
        DataValue::String(s)
    } else if let Some(n) = entry.value_number {
        DataValue::Number(n)
    } else if let Some(b) = entry.value_boolean {
        DataValue::Boolean(b)
    } else if let Some(nested) = entry.value_map {
        DataValue::Map(parse_entries(&nested))
    } else {
        tracing::warn!(key = %entry.key, "Skipping data model entry without a value");
        return None;
    };

    Some(DataEntry {
        key: entry.key,
        value,
    })
}

/// Convert decoded entries into a nested map. Later duplicate keys win.
pub fn entries_to_map(entries: &[DataEntry]) -> Map<String, Value> {
    entries
        .iter()
        .map(|entry| (entry.key.clone(), entry.value.to_value()))
        .collect()
}

impl DataValue {
    pub fn to_value(&self) -> Value {
        match self {
            DataValue::String(s) => Value::String(s.clone()),
            DataValue::Number(n) => Value::Number(n.clone()),
            DataValue::Boolean(b) => Value::Bool(*b),
            DataValue::Map(entries) => Value::Object(entries_to_map(entries)),
        }
    }
}
