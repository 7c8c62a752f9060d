//! Game user entity and aggregate statistics.

use serde::{Deserialize, Serialize};

use super::page::PageItem;
use super::time::format_epoch;

/// One game user row as returned by the player-list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameUser {
    #[serde(default)]
    pub id: u64,
    #[serde(default, rename = "gameUserId")]
    pub game_user_id: String,
    #[serde(default, rename = "userName")]
    pub user_name: String,
    #[serde(default, rename = "nickName")]
    pub nick_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// 1: enabled, 2: disabled
    #[serde(default)]
    pub enable: i32,
    #[serde(default)]
    pub ban_chat: bool,
    #[serde(default)]
    pub ban_login: bool,
    /// Epoch seconds; zero means the backend omitted it.
    #[serde(default)]
    pub register_time: i64,
    #[serde(default)]
    pub login_time: i64,

    // Display-only, filled by decorate()
    #[serde(skip_deserializing)]
    pub register_time_formatted: String,
    #[serde(skip_deserializing)]
    pub login_time_formatted: String,
}

impl PageItem for GameUser {
    fn decorate(&mut self) {
        self.register_time_formatted = format_epoch(self.register_time);
        self.login_time_formatted = format_epoch(self.login_time);
    }
}

/// Aggregate user statistics from the stats endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default, rename = "totalUsers")]
    pub total_users: u64,
    #[serde(default, rename = "activeUsers")]
    pub active_users: u64,
    #[serde(default, rename = "newUsersToday")]
    pub new_users_today: u64,
    #[serde(default, rename = "onlineUsers")]
    pub online_users: u64,
}
