//! Item/resource transaction log entity and statistics.

use serde::{Deserialize, Serialize};

use super::page::PageItem;
use super::time::format_epoch;

/// One row of the item/resource transaction log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceLog {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub res_type: String,
    #[serde(default)]
    pub res_id: i64,
    /// gain / consume / trade / system
    #[serde(default)]
    pub operation_type: String,
    #[serde(default)]
    pub quantity_change: i64,
    #[serde(default)]
    pub remaining_quantity: i64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub log_time: i64,

    #[serde(skip_deserializing)]
    pub log_time_formatted: String,
}

impl PageItem for ResourceLog {
    fn decorate(&mut self) {
        self.log_time_formatted = format_epoch(self.log_time);
    }
}

/// Aggregate transaction-log statistics from the stats endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemStats {
    #[serde(default, rename = "totalRecords")]
    pub total_records: u64,
    #[serde(default, rename = "gainRecords")]
    pub gain_records: u64,
    #[serde(default, rename = "consumeRecords")]
    pub consume_records: u64,
    #[serde(default, rename = "tradeRecords")]
    pub trade_records: u64,
    #[serde(default, rename = "systemRecords")]
    pub system_records: u64,
}
