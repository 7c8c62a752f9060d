//! Submission normalization.
//!
//! Converts user-facing field representations into the wire shapes the
//! backend expects before a mutating call is issued: calendar values
//! become epoch seconds, comma-separated id lists become integer arrays.
//! Pure and tolerant: anything that does not match is passed through
//! untouched, never escalated.

use serde_json::{Map, Value};

use crate::domain::models::time::parse_datetime_secs;

/// Produce a normalized copy of a submission record.
///
/// `time_fields` naming a date-like string are rewritten to whole epoch
/// seconds (floor); values that are already numeric or fail to parse are
/// left as-is. `id_list_fields` holding a comma-separated string become an
/// array of integers. Every other field passes through unchanged. The
/// input is never mutated.
pub fn normalize_submission(
    input: &Value,
    time_fields: &[&str],
    id_list_fields: &[&str],
) -> Value {
    let Some(obj) = input.as_object() else {
        return input.clone();
    };
    let mut out: Map<String, Value> = obj.clone();

    for field in time_fields {
        if let Some(Value::String(raw)) = out.get(*field) {
            if let Some(secs) = parse_datetime_secs(raw) {
                out.insert((*field).to_string(), Value::from(secs));
            }
        }
    }

    for field in id_list_fields {
        if let Some(Value::String(raw)) = out.get(*field) {
            let ids: Vec<Value> = raw
                .split(',')
                .filter_map(|part| part.trim().parse::<i64>().ok())
                .map(Value::from)
                .collect();
            out.insert((*field).to_string(), Value::Array(ids));
        }
    }

    Value::Object(out)
}
