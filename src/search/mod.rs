// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search pipeline
//!
//! Full-scan search over the JSON documents of one collection.
//!
//! # Architecture
//!
//! ```text
//! tokens ─▶ SearchQuery::parse
//!               │
//!   raw values ─┴─▶ scan_documents (MatchPredicate → Candidate → ResultSet)
//!                         │
//!                         └─▶ ResultSet::into_reply (sort, window) ─▶ SearchReply
//! ```
//!
//! # Request form
//!
//! ```text
//! employees  an  -name  0  10                 - "an" anywhere in the text fields, name descending
//! employees  ""  +name  0  10  department Y   - everyone in department Y, name ascending
//! employees  ""  pin    20 30                 - third page of ten, by pin
//! ```

mod accumulator;
mod error;
mod page;
mod pipeline;
mod predicate;
mod query;

pub use accumulator::{Candidate, ResultSet};
pub use error::{DocumentError, SearchError};
pub use page::{PageWindow, SearchReply};
pub use pipeline::{execute_search, scan_documents, MalformedDocumentPolicy, ScanOptions, ScanOutcome};
pub use predicate::MatchPredicate;
pub use query::{FilterPair, QueryLimits, SearchQuery, SortDirection, SortSpec, FIXED_TOKENS};
