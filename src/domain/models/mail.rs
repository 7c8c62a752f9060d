//! Personal and system mail entities.
//!
//! System mail carries attachment records referencing reference-data
//! catalogs; the attachments themselves are rendered through the catalog's
//! name lookups, not stored with names.

use serde::{Deserialize, Serialize};

use super::catalog::Attachment;
use super::page::PageItem;
use super::time::format_epoch;

/// One system (broadcast) mail row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemMail {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Game areas the mail targets; empty means all.
    #[serde(default, rename = "areaIds")]
    pub area_ids: Vec<i64>,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub end_time: i64,
    /// Latest registration time still eligible to receive the mail.
    #[serde(default)]
    pub max_reg_time: i64,

    #[serde(skip_deserializing)]
    pub create_time_formatted: String,
    #[serde(skip_deserializing)]
    pub start_time_formatted: String,
    #[serde(skip_deserializing)]
    pub end_time_formatted: String,
    #[serde(skip_deserializing)]
    pub max_reg_time_formatted: String,
}

impl PageItem for SystemMail {
    fn decorate(&mut self) {
        self.create_time_formatted = format_epoch(self.create_time);
        self.start_time_formatted = format_epoch(self.start_time);
        self.end_time_formatted = format_epoch(self.end_time);
        self.max_reg_time_formatted = format_epoch(self.max_reg_time);
    }
}

/// One personal mail row, addressed to a single player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalMail {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub create_time: i64,

    #[serde(skip_deserializing)]
    pub create_time_formatted: String,
}

impl PageItem for PersonalMail {
    fn decorate(&mut self) {
        self.create_time_formatted = format_epoch(self.create_time);
    }
}
