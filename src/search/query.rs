// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Request form parsing.
//!
//! A search request is a flat list of tokens:
//!
//! ```text
//! <key> <text> <sort> <start> <end> [<field> <value>]...
//! ```
//!
//! `<sort>` carries the direction in its first character: `-name` sorts by
//! `name` descending, `+name` (or plain `name`) ascending. `<start>`/`<end>`
//! form the half-open page window `[start, end)`.

use super::error::SearchError;
use super::page::PageWindow;

/// Tokens before the optional filter pairs.
pub const FIXED_TOKENS: usize = 5;

/// Sort order requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Signed comparator value carried on the wire: `+1` for a `-` sigil,
    /// `-1` otherwise.
    #[must_use]
    pub fn signum(&self) -> i32 {
        match self {
            Self::Descending => 1,
            Self::Ascending => -1,
        }
    }

    /// Orient a natural-order comparison
    #[inline]
    #[must_use]
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse `-field`, `+field` or `field`.
    pub fn parse(token: &str) -> Result<Self, SearchError> {
        let (direction, field) = match token.as_bytes().first() {
            Some(b'-') => (SortDirection::Descending, &token[1..]),
            Some(b'+') => (SortDirection::Ascending, &token[1..]),
            _ => (SortDirection::Ascending, token),
        };
        if field.is_empty() {
            return Err(SearchError::Malformed(format!("sort field missing in '{}'", token)));
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// One exact-match filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPair {
    pub field: String,
    pub expected: String,
}

/// Limits applied while parsing
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryLimits {
    /// None = unlimited
    pub max_filter_pairs: Option<usize>,
}

/// A validated search request. Owns copies of every argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub collection_key: String,
    pub query_text: String,
    pub sort: SortSpec,
    pub window: PageWindow,
    pub filters: Vec<FilterPair>,
    needle: String,
}

impl SearchQuery {
    pub fn parse<S: AsRef<str>>(args: &[S], limits: &QueryLimits) -> Result<Self, SearchError> {
        if args.len() < FIXED_TOKENS || (args.len() - FIXED_TOKENS) % 2 != 0 {
            return Err(SearchError::WrongArity { got: args.len() });
        }
        let pair_count = (args.len() - FIXED_TOKENS) / 2;
        if let Some(max) = limits.max_filter_pairs {
            if pair_count > max {
                return Err(SearchError::WrongArity { got: args.len() });
            }
        }

        let sort = SortSpec::parse(args[2].as_ref())?;
        let start = parse_bound("page start", args[3].as_ref())?;
        let end = parse_bound("page end", args[4].as_ref())?;
        let window = PageWindow::new(start, end)?;

        let filters = args[FIXED_TOKENS..]
            .chunks_exact(2)
            .map(|pair| FilterPair {
                field: pair[0].as_ref().to_string(),
                expected: pair[1].as_ref().to_string(),
            })
            .collect();

        Ok(Self::new(args[0].as_ref(), args[1].as_ref(), sort, window, filters))
    }

    /// Build a query directly, bypassing token parsing.
    pub fn new(
        collection_key: impl Into<String>,
        query_text: impl Into<String>,
        sort: SortSpec,
        window: PageWindow,
        filters: Vec<FilterPair>,
    ) -> Self {
        let query_text = query_text.into();
        let needle = query_text.to_lowercase();
        Self {
            collection_key: collection_key.into(),
            query_text,
            sort,
            window,
            filters,
            needle,
        }
    }

    /// Lower-cased query text used for case-insensitive matching
    #[inline]
    pub fn needle(&self) -> &str {
        &self.needle
    }
}

fn parse_bound(name: &str, token: &str) -> Result<usize, SearchError> {
    token
        .parse::<usize>()
        .map_err(|_| SearchError::Malformed(format!("{} must be a non-negative integer, got '{}'", name, token)))
}
