// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `debounce` combinator.
//!
//! Debouncing collapses a burst of calls into a single execution of the
//! wrapped function after a quiet period of at least the configured wait.
//!
//! This implements **trailing debounce** semantics by default:
//! - Each call restarts the wait timer and replaces the stored arguments
//! - When the timer expires with no newer call, the function runs once
//!   with the newest arguments
//! - A call arriving before expiry cancels and replaces the pending run
//!
//! With `immediate` set, the edge flips to **leading**: the first call of
//! a burst runs the function synchronously and the trailing run for that
//! burst is suppressed; the timer only marks the end of the quiet period.

use core::time::Duration;
use parking_lot::Mutex;
use std::sync::Arc;

use pacer_runtime::Scheduler;

/// Debounced wrapper around a function.
///
/// One `Debounce` instance owns one timer: clones share state, so calls
/// arriving through different clones belong to the same burst.
///
/// Panics from the wrapped function unwind on whichever execution context
/// runs it: the caller of [`call`](Debounce::call) for a leading-edge run,
/// the scheduler for a trailing run.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use pacer::Debounce;
/// use pacer_test_utils::{CallRecorder, ManualScheduler};
///
/// let scheduler = ManualScheduler::new();
/// let recorder: CallRecorder<u32> = CallRecorder::new();
/// let sink = recorder.clone();
///
/// let debounced = Debounce::new(
///     scheduler.clone(),
///     move |n| sink.record(n),
///     Duration::from_millis(50),
///     false,
/// );
///
/// debounced.call(1);
/// debounced.call(2);
/// scheduler.advance(Duration::from_millis(50));
///
/// assert_eq!(recorder.values(), vec![2]);
/// ```
pub struct Debounce<S: Scheduler, A: Send + 'static> {
    inner: Arc<Inner<S, A>>,
}

struct Inner<S: Scheduler, A> {
    scheduler: S,
    func: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    immediate: bool,
    state: Mutex<State<S::Handle, A>>,
}

struct State<H, A> {
    pending: Option<H>,
    last_args: Option<A>,
    // Bumped on every call; a dequeued-but-stale timer callback sees a
    // mismatch and does nothing.
    seq: u64,
}

impl<S: Scheduler, A: Send + 'static> Debounce<S, A> {
    /// Wrap `func` so it runs `wait` after the last call of a burst.
    ///
    /// With `immediate`, the first call of a burst runs `func`
    /// synchronously instead and the trailing run is suppressed.
    ///
    /// A zero `wait` still defers to the next scheduler tick in
    /// non-immediate mode; it never runs `func` synchronously.
    pub fn new(
        scheduler: S,
        func: impl Fn(A) + Send + Sync + 'static,
        wait: Duration,
        immediate: bool,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                scheduler,
                func: Box::new(func),
                wait,
                immediate,
                state: Mutex::new(State {
                    pending: None,
                    last_args: None,
                    seq: 0,
                }),
            }),
        }
    }

    /// Record one call, restarting the quiet-period timer.
    pub fn call(&self, args: A) {
        let inner = &self.inner;

        let leading = {
            let mut state = inner.state.lock();

            let was_idle = state.pending.is_none();
            if let Some(handle) = state.pending.take() {
                inner.scheduler.cancel(&handle);
            }
            state.seq = state.seq.wrapping_add(1);
            let seq = state.seq;

            let leading = if inner.immediate {
                // Leading edge fires only when the burst starts; later
                // calls in the burst are swallowed.
                if was_idle {
                    Some(args)
                } else {
                    None
                }
            } else {
                state.last_args = Some(args);
                None
            };

            let shared = Arc::clone(inner);
            tracing::trace!(wait = ?inner.wait, "debounce: (re)scheduling trailing timer");
            let handle = inner
                .scheduler
                .schedule_after(inner.wait, Box::new(move || Inner::fire(&shared, seq)));
            state.pending = Some(handle);

            leading
        };

        if let Some(args) = leading {
            tracing::trace!("debounce: leading-edge run");
            (inner.func)(args);
        }
    }
}

impl<S: Scheduler, A: Send + 'static> Inner<S, A> {
    fn fire(this: &Arc<Self>, seq: u64) {
        let args = {
            let mut state = this.state.lock();
            if state.seq != seq {
                return;
            }
            state.pending = None;
            state.last_args.take()
        };

        // In immediate mode no arguments were stored; the timer only
        // closed the burst.
        if let Some(args) = args {
            tracing::trace!("debounce: trailing run");
            (this.func)(args);
        }
    }
}

impl<S: Scheduler, A: Send + 'static> Clone for Debounce<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
