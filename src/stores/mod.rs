//! Store layer: per-entity state containers.
//!
//! Each store owns one list controller plus entity-specific state and the
//! mutation operations of its backend family. Mutations re-fetch the
//! current page on success so the visible page stays consistent with
//! server-authoritative state, and propagate failures to the caller — the
//! deliberate asymmetry with the read path, which never errors.

pub mod announcement;
pub mod item_log;
pub mod mail;
pub mod user;

pub use announcement::AnnouncementStore;
pub use item_log::ItemLogStore;
pub use mail::{PersonalMailStore, SystemMailStore};
pub use user::UserStore;
