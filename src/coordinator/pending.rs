// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! One-shot handle to a dispatched search.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

use crate::search::{SearchError, SearchReply};

pub(crate) type ReplySender = oneshot::Sender<Result<SearchReply, SearchError>>;

/// Resolves exactly once with the outcome of a dispatched search.
///
/// If the worker disappears without sending (a panic), the handle resolves
/// to [`SearchError::WorkerLost`] instead of hanging. Dropping the handle
/// does not cancel the search; its reply is discarded.
#[derive(Debug)]
#[must_use = "a dispatched search replies through this handle"]
pub struct PendingSearch {
    request_id: u64,
    rx: oneshot::Receiver<Result<SearchReply, SearchError>>,
}

impl PendingSearch {
    pub(crate) fn channel(request_id: u64) -> (ReplySender, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { request_id, rx })
    }

    /// Engine-assigned id, as it appears in log lines
    #[must_use]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }
}

impl Future for PendingSearch {
    type Output = Result<SearchReply, SearchError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SearchError::WorkerLost)))
    }
}
