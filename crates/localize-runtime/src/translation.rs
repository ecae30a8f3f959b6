//! Conversion of nested translation documents into keyed tables.

use std::collections::BTreeMap;

use localize_core::Translations;
use serde_json::Value;
use tracing::warn;

/// Flattens nested objects into dotted keys. Any non-object value is a leaf.
///
/// A top-level value that is not an object yields no entries.
pub fn flatten_nested(value: &Value) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    if let Value::Object(_) = value {
        walk("", value, &mut out);
    }
    out
}

fn walk(prefix: &str, value: &Value, out: &mut BTreeMap<String, Value>) {
    let Value::Object(map) = value else {
        out.insert(prefix.to_string(), value.clone());
        return;
    };
    for (name, child) in map {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        walk(&key, child, out);
    }
}

/// Builds a table from `{ key: [value per language] }` data, nested or flat.
///
/// Value arrays are padded or truncated to `width`; leaves that are not
/// arrays are skipped.
pub fn multi_language_table(data: &Value, width: usize) -> Translations {
    let mut table = Translations::new();
    for (key, leaf) in flatten_nested(data) {
        let Value::Array(items) = leaf else {
            warn!(key = %key, "expected an array of per-language values, skipping");
            continue;
        };
        let mut values: Vec<Option<String>> = items.iter().map(leaf_text).collect();
        fit_width(&key, &mut values, width);
        table.insert(key, values);
    }
    table
}

/// Builds `{ key: value }` pairs for one language from nested data.
pub fn single_language_entries(data: &Value) -> BTreeMap<String, String> {
    flatten_nested(data)
        .into_iter()
        .filter_map(|(key, leaf)| leaf_text(&leaf).map(|text| (key, text)))
        .collect()
}

pub(crate) fn fit_width(key: &str, values: &mut Vec<Option<String>>, width: usize) {
    if values.len() != width {
        warn!(
            key = %key,
            expected = width,
            found = values.len(),
            "translation does not match the registered language count"
        );
        values.resize(width, None);
    }
}

fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
