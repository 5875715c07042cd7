// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic virtual-clock scheduler for tests.

use core::fmt;
use core::time::Duration;
use parking_lot::Mutex;
use std::sync::Arc;

use pacer_runtime::{Callback, Scheduler};

/// A [`Scheduler`] whose clock only moves when the test calls
/// [`advance`](ManualScheduler::advance).
///
/// Callbacks are kept in a deadline-ordered queue. `advance(delta)` runs
/// every callback whose deadline falls inside the advanced span, in
/// deadline order (insertion order breaks ties), setting `now()` to each
/// callback's deadline before running it. A callback that schedules
/// further callbacks inside the span sees them run within the same
/// `advance` call, which is what lets a rescheduling loop such as a poll
/// session play out under a single `advance`.
///
/// The instant type is the `Duration` elapsed since the scheduler was
/// created.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use pacer_runtime::Scheduler;
/// use pacer_test_utils::ManualScheduler;
///
/// let scheduler = ManualScheduler::new();
/// let handle = scheduler.schedule_after(Duration::from_millis(10), Box::new(|| {}));
///
/// scheduler.advance(Duration::from_millis(9));
/// assert_eq!(scheduler.pending(), 1);
///
/// scheduler.advance(Duration::from_millis(1));
/// assert_eq!(scheduler.pending(), 0);
/// # let _ = handle;
/// ```
#[derive(Clone)]
pub struct ManualScheduler {
    inner: Arc<Mutex<Queue>>,
}

struct Queue {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

struct Entry {
    id: u64,
    deadline: Duration,
    callback: Callback,
}

impl ManualScheduler {
    /// Create a scheduler with its clock at zero and an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Queue {
                now: Duration::ZERO,
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Move the clock forward by `delta`, running every callback that
    /// comes due along the way.
    ///
    /// `advance(Duration::ZERO)` runs callbacks scheduled with a zero
    /// delay, which models the "next scheduler tick" a zero-wait debounce
    /// defers to.
    pub fn advance(&self, delta: Duration) {
        let target = self.inner.lock().now + delta;

        loop {
            let due = {
                let mut queue = self.inner.lock();
                let next = queue
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.deadline <= target)
                    .min_by_key(|(_, entry)| (entry.deadline, entry.id))
                    .map(|(index, _)| index);

                match next {
                    Some(index) => {
                        let entry = queue.entries.remove(index);
                        queue.now = queue.now.max(entry.deadline);
                        Some(entry.callback)
                    }
                    None => None,
                }
            };

            match due {
                // Run outside the lock so the callback can reschedule.
                Some(callback) => callback(),
                None => break,
            }
        }

        self.inner.lock().now = target;
    }

    /// Number of callbacks still queued.
    pub fn pending(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.inner.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("pending", &queue.entries.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    type Instant = Duration;

    fn schedule_after(&self, delay: Duration, callback: Callback) -> Self::Handle {
        let mut queue = self.inner.lock();
        let id = queue.next_id;
        queue.next_id += 1;
        let deadline = queue.now + delay;
        queue.entries.push(Entry {
            id,
            deadline,
            callback,
        });
        id
    }

    fn cancel(&self, handle: &Self::Handle) {
        self.inner.lock().entries.retain(|entry| entry.id != *handle);
    }

    fn now(&self) -> Self::Instant {
        self.inner.lock().now
    }
}
