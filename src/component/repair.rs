//! Repairs for common generator mistakes in component payloads.
//!
//! Generators frequently emit legacy or bare-value property forms. These
//! are upgraded to the literal-wrapper convention before validation so the
//! renderer only ever sees one shape per field.

use serde_json::{json, Map, Value};

const DEFAULT_ICON: &str = "help";
const DEFAULT_TEXT_USAGE: &str = "body";
const DEFAULT_IMAGE_FIT: &str = "cover";

/// Normalize a raw `{id, component: {<Kind>: {...}}}` payload.
///
/// Never fails: anything that does not match a known repair is returned
/// as-is.
pub fn repair(mut raw: Value) -> Value {
    let Some(component) = raw.get_mut("component").and_then(Value::as_object_mut) else {
        return raw;
    };
    let Some((kind, props)) = component.iter_mut().next() else {
        return raw;
    };
    if kind == "Icon" && !props.is_object() {
        *props = Value::Object(Map::new());
    }
    let Some(props) = props.as_object_mut() else {
        return raw;
    };

    match kind.as_str() {
        "Icon" => repair_icon(props),
        "Text" => repair_text(props),
        "Image" => repair_image(props),
        _ => {}
    }

    raw
}

/// Icon names arrive in several shapes. Resolution order:
/// `icon.materialIcon.name`, `materialIcon.name`, bare string `name`.
/// An existing `name.literalString` is left untouched.
fn repair_icon(props: &mut Map<String, Value>) {
    let resolved = non_empty_str(props, &["icon", "materialIcon", "name"])
        .or_else(|| non_empty_str(props, &["materialIcon", "name"]))
        .or_else(|| props.get("name").and_then(Value::as_str))
        .map(str::to_string);

    if resolved.is_none() && non_empty_str(props, &["name", "literalString"]).is_some() {
        return;
    }

    let name = resolved.unwrap_or_else(|| DEFAULT_ICON.to_string());
    props.clear();
    props.insert("name".to_string(), literal(name));
}

fn repair_text(props: &mut Map<String, Value>) {
    if let Some(Value::String(text)) = props.get_mut("text") {
        let text = std::mem::take(text);
        props.insert("text".to_string(), literal(text));
    }
    if is_blank(props.get("usageHint")) {
        props.insert("usageHint".to_string(), json!(DEFAULT_TEXT_USAGE));
    }
}

fn repair_image(props: &mut Map<String, Value>) {
    if let Some(Value::String(url)) = props.get_mut("url") {
        let url = std::mem::take(url);
        props.insert("url".to_string(), literal(url));
    }
    if is_blank(props.get("fit")) {
        props.insert("fit".to_string(), json!(DEFAULT_IMAGE_FIT));
    }
}

/// `{literalString: value}`
pub fn literal(value: impl Into<String>) -> Value {
    json!({ "literalString": value.into() })
}

fn non_empty_str<'a>(props: &'a Map<String, Value>, path: &[&str]) -> Option<&'a str> {
    let (first, rest) = path.split_first()?;
    let mut current = props.get(*first)?;
    for segment in rest {
        current = current.get(*segment)?;
    }
    current.as_str().filter(|s| !s.is_empty())
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
