//! Hierarchical data model driving data-bound component properties.

mod binding;
mod entry;
mod path;

use serde_json::{Map, Value};

pub use binding::resolve_bound;
pub use entry::{entries_to_map, parse_entries, DataEntry, DataValue};
pub use path::{deep_merge, get_at_path, segments, set_at_path};

/// A fresh, empty data-model tree.
pub fn empty_tree() -> Value {
    Value::Object(Map::new())
}
