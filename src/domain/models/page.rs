//! The one-page slice of a server-side collection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Page number the backend falls back to when it omits one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size the backend falls back to when it omits one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Behavior required of entities managed by a list controller.
///
/// `decorate` fills display-only fields (formatted timestamps) after
/// deserialization; the default is a no-op for entities without any.
pub trait PageItem: DeserializeOwned + Send + Sync {
    fn decorate(&mut self) {}
}

/// One fetched, bounded slice of a larger server-side collection.
///
/// Replaced wholesale on every successful fetch; `page` and `page_size`
/// reflect what the backend actually returned, not what was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPage<E> {
    pub items: Vec<E>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<E> Default for EntityPage<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<E> EntityPage<E> {
    /// Number of pages needed for `total` entries at the current size.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_shape() {
        let page: EntityPage<()> = EntityPage::default();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: EntityPage<()> = EntityPage {
            items: vec![],
            total: 21,
            page: 1,
            page_size: 10,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
