//! Change summaries for audit entries
//!
//! Compares the top-level fields of two record snapshots and lists the ones
//! that differ as `field: old -> new`.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

/// Summarize which top-level fields changed between two records.
///
/// Returns `None` when nothing changed or either side fails to serialize.
pub fn summarize_changes<T: Serialize>(before: &T, after: &T) -> Option<String> {
    let before = serde_json::to_value(before).ok()?;
    let after = serde_json::to_value(after).ok()?;
    let (Value::Object(before), Value::Object(after)) = (before, after) else {
        return None;
    };

    let keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
    let changes: Vec<String> = keys
        .into_iter()
        .filter_map(|key| {
            let old = before.get(key).unwrap_or(&Value::Null);
            let new = after.get(key).unwrap_or(&Value::Null);
            (old != new).then(|| format!("{}: {} -> {}", key, short(old), short(new)))
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn short(value: &Value) -> String {
    match value {
        Value::Null => "(none)".to_string(),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("{}...", head)
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
