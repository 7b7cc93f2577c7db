//! Pagination types for bulk queries.

/// A (start-index, count) request over an ordered object enumeration.
///
/// A negative start index is unrepresentable by construction; a zero
/// `count` is rejected by [`BulkCursor::validate`] before any backend
/// call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkCursor {
    /// Index of the first object to return.
    pub from_index: u32,
    /// Maximum number of objects to return.
    pub count: u32,
}

impl BulkCursor {
    /// Creates a cursor starting at `from_index` requesting up to `count` items.
    pub fn new(from_index: u32, count: u32) -> Self {
        Self { from_index, count }
    }

    /// Checks the cursor's invariants.
    ///
    /// Returns a human-readable reason on failure; the broker wraps it
    /// into an `InvalidArgument` error.
    pub fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("count must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// One page of results from a bulk query.
///
/// Holds at most the requested `count` items, whether more objects remain
/// past this page, and the index at which the next page starts. Reporting
/// `next_index` keeps pagination stable even if the underlying collection
/// changes between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The objects in this page, in enumeration order.
    pub items: Vec<T>,
    /// True if objects remain past this page.
    pub has_more: bool,
    /// Start index for the next page.
    pub next_index: u32,
}

impl<T> Page<T> {
    /// Creates a page from its parts.
    pub fn new(items: Vec<T>, has_more: bool, next_index: u32) -> Self {
        Self {
            items,
            has_more,
            next_index,
        }
    }

    /// Creates an empty terminal page.
    ///
    /// Used when the start index lies past the end of the enumeration;
    /// this is a valid result, not an error.
    pub fn empty(next_index: u32) -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
            next_index,
        }
    }

    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slices one page out of an ordered collection.
///
/// Shared by backend implementations; centralizes the "at most `count`
/// items, past-the-end is empty" arithmetic.
pub fn page_of<T: Clone>(items: &[T], cursor: BulkCursor) -> Page<T> {
    let total = items.len();
    let from = cursor.from_index as usize;
    if from >= total {
        return Page::empty(total as u32);
    }
    let end = from.saturating_add(cursor.count as usize).min(total);
    Page::new(items[from..end].to_vec(), end < total, end as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_validate_rejects_zero_count() {
        let cursor = BulkCursor::new(0, 0);
        assert!(cursor.validate().is_err());
    }

    #[test]
    fn test_cursor_validate_accepts_positive_count() {
        let cursor = BulkCursor::new(10, 1);
        assert!(cursor.validate().is_ok());
    }

    #[test]
    fn test_page_of_returns_at_most_count() {
        let items: Vec<u32> = (0..10).collect();
        let page = page_of(&items, BulkCursor::new(0, 3));

        assert_eq!(page.items, vec![0, 1, 2]);
        assert!(page.has_more);
        assert_eq!(page.next_index, 3);
    }

    #[test]
    fn test_page_of_partial_last_page() {
        let items: Vec<u32> = (0..5).collect();
        let page = page_of(&items, BulkCursor::new(3, 10));

        assert_eq!(page.items, vec![3, 4]);
        assert!(!page.has_more);
        assert_eq!(page.next_index, 5);
    }

    #[test]
    fn test_page_of_past_end_is_empty_not_error() {
        let items: Vec<u32> = (0..5).collect();
        let page = page_of(&items, BulkCursor::new(100, 10));

        assert!(page.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.next_index, 5);
    }

    #[test]
    fn test_page_of_exact_boundary() {
        let items: Vec<u32> = (0..4).collect();
        let page = page_of(&items, BulkCursor::new(0, 4));

        assert_eq!(page.len(), 4);
        assert!(!page.has_more);
        assert_eq!(page.next_index, 4);
    }
}
