//! JSON bridging for values and records.
//!
//! Repositories and callers frequently exchange entities as JSON, so this
//! module renders [`Value`]s and [`Record`]s into `serde_json` trees and
//! back. Non-finite floats serialize as the strings `"NaN"`, `"Infinity"`
//! and `"-Infinity"` so they survive a round trip; opaque identifiers
//! serialize as their canonical string and come back as plain strings.

use serde_json::json;

use crate::model::Record;
use crate::value::Value;

/// Render a [`Value`] as JSON.
///
/// Lossy by design for variants JSON cannot represent natively: bytes
/// become a hex string, timestamps RFC 3339 strings, decimals and opaque
/// identifiers their canonical string forms.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        Value::Float(f) => {
            if f.is_nan() {
                json!("NaN")
            } else if f.is_infinite() {
                json!(if *f > 0.0 { "Infinity" } else { "-Infinity" })
            } else {
                json!(f)
            }
        }
        Value::String(s) => json!(s),
        Value::Bytes(bytes) => {
            let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            json!(hex)
        }
        Value::Uuid(u) => json!(u.to_string()),
        Value::DateTime(dt) => json!(dt.to_rfc3339()),
        Value::Decimal(d) => json!(d.to_string()),
        Value::Json(j) => j.clone(),
        Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
        Value::Id(id) => json!(id.canonical_string()),
    }
}

/// Read a JSON node back into a [`Value`].
///
/// Inverse of [`value_to_json`] up to type erasure: strings stay strings
/// (identifier, timestamp and decimal renderings are not re-detected) and
/// objects land in [`Value::Json`].
pub fn value_from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => match s.as_str() {
            "NaN" => Value::Float(f64::NAN),
            "Infinity" => Value::Float(f64::INFINITY),
            "-Infinity" => Value::Float(f64::NEG_INFINITY),
            _ => Value::String(s.clone()),
        },
        serde_json::Value::Array(items) => {
            Value::Array(items.iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(_) => Value::Json(json.clone()),
    }
}

/// Render a record as a single JSON object merging both views: persisted
/// attributes plus any included relation entities, keyed by relation name.
pub fn record_to_json(record: &Record) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for (name, value) in record.attributes() {
        object.insert(name.clone(), value_to_json(value));
    }
    for (name, related) in record.relations() {
        object.insert(name.clone(), record_to_json(related));
    }
    serde_json::Value::Object(object)
}
