//! Announcement entity.

use serde::{Deserialize, Serialize};

use super::page::PageItem;
use super::time::format_epoch;

/// One announcement row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, rename = "startTime")]
    pub start_time: i64,
    #[serde(default, rename = "endTime")]
    pub end_time: i64,
    /// Non-zero when pinned to the top of the in-game board.
    #[serde(default)]
    pub top: i64,

    #[serde(skip_deserializing)]
    pub start_time_formatted: String,
    #[serde(skip_deserializing)]
    pub end_time_formatted: String,
}

impl PageItem for Announcement {
    fn decorate(&mut self) {
        self.start_time_formatted = format_epoch(self.start_time);
        self.end_time_formatted = format_epoch(self.end_time);
    }
}
