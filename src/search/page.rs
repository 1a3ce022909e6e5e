// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Sorting and page slicing.
//!
//! The window is half-open: `[start, end)`, with `end` clamped to the number
//! of matches. The total is always reported, whatever the window.

use super::accumulator::ResultSet;
use super::error::SearchError;
use super::query::SortDirection;

/// Half-open page window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    start: usize,
    end: usize,
}

impl PageWindow {
    /// Rejects inverted windows (`end < start`).
    pub fn new(start: usize, end: usize) -> Result<Self, SearchError> {
        if end < start {
            return Err(SearchError::Malformed(format!(
                "page end {} is before page start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Clamp the window against `total` matches. The returned range is empty
    /// when the window lies past the end.
    #[must_use]
    pub fn slice_bounds(&self, total: usize) -> std::ops::Range<usize> {
        let end = self.end.min(total);
        let start = self.start.min(end);
        start..end
    }
}

/// Reply to one search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchReply {
    /// No document matched
    Empty,
    /// `total` matches; `documents` holds the window in final sort order
    Page { total: usize, documents: Vec<Vec<u8>> },
}

impl SearchReply {
    /// Total number of matches, independent of the window
    #[must_use]
    pub fn total(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Page { total, .. } => *total,
        }
    }

    /// The page's raw documents (empty for [`SearchReply::Empty`])
    #[must_use]
    pub fn documents(&self) -> &[Vec<u8>] {
        match self {
            Self::Empty => &[],
            Self::Page { documents, .. } => documents,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl ResultSet {
    /// Sort by key in `direction` and cut the window out.
    ///
    /// Sorting is skipped when no page can be non-empty. The sort is stable:
    /// equal keys stay in scan order. Candidates outside the window are
    /// dropped here.
    pub fn into_reply(mut self, direction: SortDirection, window: PageWindow) -> SearchReply {
        let total = self.candidates.len();
        if total == 0 {
            return SearchReply::Empty;
        }

        if total > window.start() {
            self.candidates
                .sort_by(|a, b| direction.apply(a.sort_key().cmp(b.sort_key())));
        }

        let range = window.slice_bounds(total);
        let documents = self
            .candidates
            .into_iter()
            .enumerate()
            .filter_map(|(idx, c)| range.contains(&idx).then(|| c.into_raw()))
            .collect();

        SearchReply::Page { total, documents }
    }
}
