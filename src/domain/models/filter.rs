//! Filter records: named constraints narrowing a list fetch.
//!
//! Filters are an open per-entity record rather than a closed struct: the
//! backend ignores fields it does not know, and every entity family has its
//! own default shape. Time-range values are normalized into
//! `start_time`/`end_time` wire fields per request and never written back
//! into the stored record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::time::parse_datetime_secs;

/// A single filter value: a free-form string, an integer, or a closed
/// `[start, end]` time range of date-like strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Str(String),
    Int(i64),
    Range(Vec<String>),
}

impl FilterValue {
    pub fn str(value: impl Into<String>) -> Self {
        FilterValue::Str(value.into())
    }

    /// The empty-string value every default filter shape starts from.
    pub fn empty() -> Self {
        FilterValue::Str(String::new())
    }

    /// An unset time range.
    pub fn empty_range() -> Self {
        FilterValue::Range(Vec::new())
    }
}

/// Mapping from filter-field name to value.
pub type FilterMap = BTreeMap<String, FilterValue>;

/// Flatten a filter record into wire parameters.
///
/// Strings and integers pass through under their own names (empty strings
/// included, matching what the backend expects from an unfilled form). A
/// two-element range whose endpoints both parse as dates is emitted as
/// epoch-second `start_time`/`end_time` fields; incomplete or unparseable
/// ranges are dropped from the request.
pub fn wire_params(filters: &FilterMap) -> Map<String, Value> {
    let mut params = Map::new();
    for (name, value) in filters {
        match value {
            FilterValue::Str(s) => {
                params.insert(name.clone(), Value::String(s.clone()));
            }
            FilterValue::Int(i) => {
                params.insert(name.clone(), Value::Number(Number::from(*i)));
            }
            FilterValue::Range(range) => {
                if let [start, end] = range.as_slice() {
                    if let (Some(start), Some(end)) =
                        (parse_datetime_secs(start), parse_datetime_secs(end))
                    {
                        params.insert("start_time".to_string(), Value::from(start));
                        params.insert("end_time".to_string(), Value::from(end));
                    }
                }
            }
        }
    }
    params
}

/// Shallow-merge `partial` into `filters`: new values override, all other
/// stored values persist.
pub fn merge_filters(filters: &mut FilterMap, partial: FilterMap) {
    for (name, value) in partial {
        filters.insert(name, value);
    }
}
