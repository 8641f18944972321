//! Fan-out scheduler for crawl tasks
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore
//! - Closing admission when a fail-fast crawl aborts

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Admission gate bounding how many fetches run at once
///
/// Tasks beyond the limit wait for a free slot instead of being dropped.
/// Once closed, waiting tasks are turned away.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    global_semaphore: Arc<Semaphore>,

    /// Configured fan-out limit
    limit: usize,
}

impl Scheduler {
    /// Creates a scheduler allowing `limit` concurrent fetches (at least one)
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            global_semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Waits for a free fetch slot
    ///
    /// # Returns
    ///
    /// * `Some(permit)` - The slot is held until the permit is dropped
    /// * `None` - The scheduler was closed while waiting
    pub async fn admit(&self) -> Option<OwnedSemaphorePermit> {
        self.global_semaphore.clone().acquire_owned().await.ok()
    }

    /// Stops admitting tasks; permits already handed out stay valid
    pub fn close(&self) {
        self.global_semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.global_semaphore.is_closed()
    }

    /// Configured fan-out limit
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of slots currently held
    pub fn in_flight(&self) -> usize {
        self.limit - self.global_semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_admit_up_to_limit() {
        let scheduler = Scheduler::new(2);

        let first = scheduler.admit().await;
        let second = scheduler.admit().await;
        assert!(first.is_some());
        assert!(second.is_some());
        assert_eq!(scheduler.in_flight(), 2);

        // A third admission has to wait until a slot is released
        let waiting = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            scheduler.admit(),
        )
        .await;
        assert!(waiting.is_err());

        drop(first);
        assert_eq!(scheduler.in_flight(), 1);
        assert!(scheduler.admit().await.is_some());
    }

    #[tokio::test]
    async fn test_close_turns_away_waiters() {
        let scheduler = Scheduler::new(1);
        let held = scheduler.admit().await;
        assert!(held.is_some());

        let waiter = {
            let scheduler = scheduler.clone();
            tokio::spawn(async move { scheduler.admit().await.is_some() })
        };

        scheduler.close();
        assert!(scheduler.is_closed());
        assert!(!waiter.await.unwrap());
    }

    #[test]
    fn test_zero_limit_clamped() {
        let scheduler = Scheduler::new(0);
        assert_eq!(scheduler.limit(), 1);
        assert_eq!(scheduler.in_flight(), 0);
    }
}
