// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Public types for the search coordinator.

/// Lifecycle stage of one search request.
///
/// ```text
/// Received → Dispatched → Fetching → Scanning → Sorting → Replying → Done
///                │            │          │
///                └────────────┴──────────┴──→ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    /// Arguments received, not yet validated
    Received,
    /// Admitted into the worker pool
    Dispatched,
    /// Waiting on the store's list-values call
    Fetching,
    /// Parsing and filtering documents
    Scanning,
    /// Ordering matches and cutting the page
    Sorting,
    /// Reply assembled, about to resume the caller
    Replying,
    /// Caller resumed with a reply
    Done,
    /// Caller resumed with an error
    Failed,
}

impl std::fmt::Display for SearchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Received => write!(f, "Received"),
            Self::Dispatched => write!(f, "Dispatched"),
            Self::Fetching => write!(f, "Fetching"),
            Self::Scanning => write!(f, "Scanning"),
            Self::Sorting => write!(f, "Sorting"),
            Self::Replying => write!(f, "Replying"),
            Self::Done => write!(f, "Done"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Counters describing what the engine has done so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    /// Admitted requests that have not replied yet
    pub in_flight: usize,
    /// Requests that replied with a result
    pub completed: u64,
    /// Requests that replied with an error from the worker
    pub failed: u64,
    /// Requests refused because the pool was saturated
    pub rejected: u64,
    /// Requests refused as malformed before dispatch
    pub invalid: u64,
}

impl EngineStats {
    /// Every request the engine has answered, one way or another
    #[must_use]
    pub fn answered(&self) -> u64 {
        self.completed + self.failed + self.rejected + self.invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(format!("{}", SearchStage::Received), "Received");
        assert_eq!(format!("{}", SearchStage::Sorting), "Sorting");
        assert_eq!(format!("{}", SearchStage::Failed), "Failed");
    }

    #[test]
    fn test_answered() {
        let stats = EngineStats { in_flight: 4, completed: 3, failed: 1, rejected: 2, invalid: 1 };
        assert_eq!(stats.answered(), 7);
    }
}
