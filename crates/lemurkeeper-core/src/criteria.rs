//! Filter criteria: the user's current search text and category choice.

use crate::tracked::Tracked;

/// Category value meaning "no category restriction".
pub const CATEGORY_ALL: &str = "All";

/// Two independent, user-editable filter cells.
///
/// Writes are visible to readers immediately. `category` is not validated:
/// a value outside the offered set simply matches nothing.
#[derive(Debug)]
pub struct FilterCriteria {
    query: Tracked<String>,
    category: Tracked<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self {
            query: Tracked::new(String::new()),
            category: Tracked::new(CATEGORY_ALL.to_string()),
        }
    }

    pub fn query(&self) -> &str {
        self.query.get()
    }

    pub fn category(&self) -> &str {
        self.category.get()
    }

    /// Set the search text. Stored verbatim, not trimmed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        self.query.set(query.into())
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> bool {
        self.category.set(category.into())
    }

    pub fn query_revision(&self) -> u64 {
        self.query.revision()
    }

    pub fn category_revision(&self) -> u64 {
        self.category.revision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let criteria = FilterCriteria::new();
        assert_eq!(criteria.query(), "");
        assert_eq!(criteria.category(), CATEGORY_ALL);
    }

    #[test]
    fn cells_are_independent() {
        let mut criteria = FilterCriteria::new();
        let category_rev = criteria.category_revision();
        assert!(criteria.set_query("  ring "));
        assert_eq!(criteria.query(), "  ring ");
        assert_eq!(criteria.category_revision(), category_rev);

        let query_rev = criteria.query_revision();
        assert!(criteria.set_category("Old"));
        assert_eq!(criteria.category(), "Old");
        assert_eq!(criteria.query_revision(), query_rev);
    }

    #[test]
    fn unchanged_write_keeps_revision() {
        let mut criteria = FilterCriteria::new();
        let rev = criteria.category_revision();
        assert!(!criteria.set_category(CATEGORY_ALL));
        assert_eq!(criteria.category_revision(), rev);
    }
}
