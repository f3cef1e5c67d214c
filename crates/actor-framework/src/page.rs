//! # Pagination
//!
//! `List` requests carry an optional [`PageRequest`]; the actor answers with a [`Listing`]
//! holding one page of matches plus the total match count.

use serde::{Deserialize, Serialize};

/// A 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Rejects zero pages and zero limits.
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 || self.limit < 1 {
            return Err(format!(
                "page and limit must be at least 1 (page={}, limit={})",
                self.page, self.limit
            ));
        }
        Ok(())
    }

    /// Number of matches skipped before this page starts.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// Matches across all pages.
    pub total: usize,
    /// `None` when the listing was unpaged.
    pub page: Option<PageRequest>,
}

impl<T> Listing<T> {
    pub fn total_pages(&self) -> usize {
        match self.page {
            Some(page) => self.total.div_ceil(page.limit as usize),
            None => usize::from(self.total > 0),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
        }
    }
}
