// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Bounded worker pool.
//!
//! Two semaphores:
//! - **admission** (`workers + max_pending` permits): taken without waiting at
//!   dispatch. None left means the request is refused on the spot.
//! - **execution** (`workers` permits): awaited by an admitted request before
//!   it touches the store. Admitted requests queue here.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::search::SearchError;

#[derive(Clone)]
pub struct WorkerPool {
    admission: Arc<Semaphore>,
    execution: Arc<Semaphore>,
    capacity: usize,
    workers: usize,
}

/// Slot held from dispatch until just before the caller is resumed.
#[must_use]
pub struct Admission {
    _permit: OwnedSemaphorePermit,
}

impl WorkerPool {
    /// A pool with at least one worker.
    pub fn new(workers: usize, max_pending: usize) -> Self {
        let workers = workers.max(1);
        let capacity = workers + max_pending;
        Self {
            admission: Arc::new(Semaphore::new(capacity)),
            execution: Arc::new(Semaphore::new(workers)),
            capacity,
            workers,
        }
    }

    /// Take an admission slot or fail immediately.
    pub fn try_admit(&self) -> Result<Admission, SearchError> {
        self.admission
            .clone()
            .try_acquire_owned()
            .map(|permit| Admission { _permit: permit })
            .map_err(|_| SearchError::PoolExhausted)
    }

    /// Wait for a free worker.
    pub async fn acquire_worker(&self) -> Result<OwnedSemaphorePermit, SearchError> {
        self.execution
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| SearchError::WorkerLost)
    }

    /// Admitted requests that have not released their slot
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.capacity - self.admission.available_permits()
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admission_is_bounded() {
        let pool = WorkerPool::new(1, 1);
        assert_eq!(pool.capacity(), 2);

        let a = pool.try_admit().unwrap();
        let b = pool.try_admit().unwrap();
        assert_eq!(pool.in_flight(), 2);
        assert!(matches!(pool.try_admit(), Err(SearchError::PoolExhausted)));

        drop(a);
        assert_eq!(pool.in_flight(), 1);
        let _c = pool.try_admit().unwrap();
        drop(b);
    }

    #[test]
    fn test_zero_workers_becomes_one() {
        let pool = WorkerPool::new(0, 0);
        assert_eq!(pool.workers(), 1);
        assert!(pool.try_admit().is_ok());
    }

    #[tokio::test]
    async fn test_execution_permits() {
        let pool = WorkerPool::new(2, 0);
        let w1 = pool.acquire_worker().await.unwrap();
        let _w2 = pool.acquire_worker().await.unwrap();

        let waiting = {
            let pool = pool.clone();
            tokio::spawn(async move { pool.acquire_worker().await.map(|_| ()) })
        };
        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());

        drop(w1);
        waiting.await.unwrap().unwrap();
    }
}
