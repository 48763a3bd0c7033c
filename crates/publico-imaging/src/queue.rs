//! Bounded-concurrency admission control for image transforms.
//!
//! Decode/re-encode work is the one CPU- and memory-hungry thing this
//! process does, so the proxy route gates on this queue: at most
//! `max_concurrent` transforms run at once, excess callers wait in strict
//! FIFO order, and a freed slot is handed to the head waiter after a short
//! delay that smooths bursty release of queued work.
//!
//! Slots are RAII guards. Dropping the guard releases exactly once, which
//! covers success, error and cancellation paths alike. All counter/waiter
//! mutation happens under one mutex that is never held across an await.

use crate::error::{ImagingError, ImagingResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Default cap on concurrently processed transforms.
pub const DEFAULT_MAX_CONCURRENT: usize = 5;
/// Default delay before a freed slot wakes the head waiter.
pub const DEFAULT_RELEASE_DELAY: Duration = Duration::from_millis(50);

struct QueueState {
    active: usize,
    waiters: VecDeque<oneshot::Sender<()>>,
}

/// FIFO admission queue. Construct once at the composition root and share
/// via `Arc`; there is deliberately no global instance.
pub struct AdmissionQueue {
    inner: Mutex<QueueState>,
    max_concurrent: usize,
    release_delay: Duration,
}

impl AdmissionQueue {
    /// Queue with the default capacity and release delay.
    #[must_use]
    pub fn with_defaults() -> Arc<Self> {
        Self::new(DEFAULT_MAX_CONCURRENT, DEFAULT_RELEASE_DELAY)
    }

    /// Queue with explicit capacity and release delay.
    #[must_use]
    pub fn new(max_concurrent: usize, release_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(QueueState {
                active: 0,
                waiters: VecDeque::new(),
            }),
            max_concurrent: max_concurrent.max(1),
            release_delay,
        })
    }

    /// Acquire a slot, waiting in FIFO order when at capacity.
    pub async fn acquire(self: &Arc<Self>) -> ImagingResult<SlotGuard> {
        let waiter = {
            let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            if state.active < self.max_concurrent {
                state.active += 1;
                None
            } else {
                let (tx, rx) = oneshot::channel();
                state.waiters.push_back(tx);
                Some(rx)
            }
        };

        if let Some(rx) = waiter {
            // The sender is dropped without firing only if the queue itself
            // goes away mid-wait; surface that instead of running ungated
            rx.await
                .map_err(|_| ImagingError::Admission("queue dropped while waiting".to_string()))?;
        }

        Ok(SlotGuard {
            queue: Arc::clone(self),
        })
    }

    /// Currently active slot count (observability and tests).
    #[must_use]
    pub fn active(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).active
    }

    /// Number of callers currently waiting.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .waiters
            .len()
    }

    /// Release one slot: hand it to the head waiter (after the release
    /// delay) or decrement the active count.
    fn release(self: &Arc<Self>) {
        let waiter = {
            let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            match state.waiters.pop_front() {
                Some(tx) => Some(tx),
                None => {
                    state.active = state.active.saturating_sub(1);
                    None
                }
            }
        };

        if let Some(tx) = waiter {
            // The active count transfers to the waiter; no net change
            let queue = Arc::clone(self);
            tokio::spawn(async move {
                tokio::time::sleep(queue.release_delay).await;
                if tx.send(()).is_err() {
                    // Waiter cancelled while queued: pass the slot along
                    queue.release();
                }
            });
        }
    }
}

/// A held capacity slot. Dropping it releases the slot exactly once.
pub struct SlotGuard {
    queue: Arc<AdmissionQueue>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.queue.release();
    }
}
