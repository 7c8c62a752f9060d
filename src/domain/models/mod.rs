pub mod announcement;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod item;
pub mod mail;
pub mod page;
pub mod time;
pub mod user;

pub use announcement::Announcement;
pub use catalog::{Attachment, CatalogEntry, ResourceType};
pub use config::{Config, HttpConfig, LoggingConfig};
pub use filter::{wire_params, FilterMap, FilterValue};
pub use item::{ItemStats, ResourceLog};
pub use mail::{PersonalMail, SystemMail};
pub use page::{EntityPage, PageItem, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use user::{GameUser, UserStats};
