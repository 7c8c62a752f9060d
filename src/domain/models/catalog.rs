//! Reference-data shapes: resource types, catalog entries, and the
//! attachment records embedded in mail entities.

use serde::{Deserialize, Serialize};

/// One named category of in-game reward/currency (gold, gem, title, ...).
///
/// Fetched once per session as a flat set and treated as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    #[serde(rename = "type")]
    pub type_id: String,
    pub name: String,
}

/// One id -> display-name row of a resource type's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
}

/// A `(type, id, amount)` triple embedded in a mail entity.
///
/// Never stored independently; consumed transiently to drive catalog
/// loading and rendered through the catalog's name lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub res_type: String,
    pub id: i64,
    #[serde(default)]
    pub amount: i64,
}
