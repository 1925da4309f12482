//! Pagination types shared by repositories and services

use serde::Serialize;

/// A zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Create a page request. A size of zero is treated as one.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Row offset of the first element, or `None` if it does not fit in a u64
    pub fn checked_offset(&self) -> Option<u64> {
        self.page.checked_mul(self.size)
    }

    /// Whether this page starts past the last of `total_elements`
    pub fn is_beyond(&self, total_elements: u64) -> bool {
        self.checked_offset()
            .map_or(true, |offset| offset >= total_elements)
    }
}

/// One page of results plus totals for the whole query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(request.size),
        }
    }

    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
