//! Offset/limit pagination over an in-memory sequence

use serde::Serialize;

/// Largest page a caller may request
pub const MAX_PAGE_LIMIT: usize = 100;

/// One page of a ranked sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Size of the full sequence before slicing
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

impl<T> Page<T> {
    /// Transform the items, keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            skip: self.skip,
            limit: self.limit,
        }
    }
}

/// Slice `items[skip..skip + limit]`. Past the end yields an empty page.
pub fn paginate<T>(items: Vec<T>, skip: usize, limit: usize) -> Page<T> {
    let total = items.len();
    let items = items.into_iter().skip(skip).take(limit).collect();
    Page {
        items,
        total,
        skip,
        limit,
    }
}
