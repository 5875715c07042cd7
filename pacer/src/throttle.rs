// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `throttle` combinator.
//!
//! Throttling rate-limits calls to the wrapped function to at most one
//! execution per window.
//!
//! This implements **leading + trailing** semantics:
//! - The first call in an idle throttle runs the function immediately and
//!   opens a window of the configured wait
//! - Calls inside the window do not run; they replace the single pending
//!   trailing run, which fires at the window boundary with the most
//!   recent call's arguments
//! - A trailing run re-opens a new window starting at its own fire time,
//!   so under continuous calling the function runs once per window and the
//!   final call of a rapid sequence is never lost

use core::time::Duration;
use parking_lot::Mutex;
use std::sync::Arc;

use pacer_runtime::Scheduler;

/// Wait applied when a zero duration is passed to [`Throttle::new`].
pub const DEFAULT_THROTTLE_WAIT: Duration = Duration::from_millis(250);

/// Throttled wrapper around a function.
///
/// Clones share state: one instance means one window, whoever calls.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use pacer::Throttle;
/// use pacer_test_utils::{CallRecorder, ManualScheduler};
///
/// let scheduler = ManualScheduler::new();
/// let recorder: CallRecorder<u32> = CallRecorder::new();
/// let sink = recorder.clone();
///
/// let throttled = Throttle::new(scheduler.clone(), move |n| sink.record(n), Duration::from_millis(100));
///
/// throttled.call(1); // leading run, opens the window
/// throttled.call(2); // inside the window, becomes the trailing run
/// throttled.call(3); // replaces it
/// scheduler.advance(Duration::from_millis(100));
///
/// assert_eq!(recorder.values(), vec![1, 3]);
/// ```
pub struct Throttle<S: Scheduler, A: Send + 'static> {
    inner: Arc<Inner<S, A>>,
}

struct Inner<S: Scheduler, A> {
    scheduler: S,
    func: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    state: Mutex<State<S, A>>,
}

struct State<S: Scheduler, A> {
    last_run: Option<S::Instant>,
    pending: Option<S::Handle>,
    last_args: Option<A>,
    seq: u64,
}

impl<S: Scheduler, A: Send + 'static> Throttle<S, A> {
    /// Wrap `func` so it runs at most once per `wait` window.
    ///
    /// A zero `wait` selects [`DEFAULT_THROTTLE_WAIT`].
    pub fn new(scheduler: S, func: impl Fn(A) + Send + Sync + 'static, wait: Duration) -> Self {
        let wait = if wait.is_zero() {
            DEFAULT_THROTTLE_WAIT
        } else {
            wait
        };
        Self {
            inner: Arc::new(Inner {
                scheduler,
                func: Box::new(func),
                wait,
                state: Mutex::new(State {
                    last_run: None,
                    pending: None,
                    last_args: None,
                    seq: 0,
                }),
            }),
        }
    }

    /// Record one call.
    ///
    /// Runs `func` synchronously when the throttle is idle; otherwise
    /// replaces the pending trailing run.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        let now = inner.scheduler.now();

        let leading = {
            let mut state = inner.state.lock();

            match state.last_run {
                Some(last) if now < last + inner.wait => {
                    // Inside the window: replace the trailing run.
                    if let Some(handle) = state.pending.take() {
                        inner.scheduler.cancel(&handle);
                    }
                    state.seq = state.seq.wrapping_add(1);
                    let seq = state.seq;
                    state.last_args = Some(args);

                    let remaining = (last + inner.wait) - now;
                    let shared = Arc::clone(inner);
                    tracing::trace!(?remaining, "throttle: scheduling trailing run");
                    let handle = inner
                        .scheduler
                        .schedule_after(remaining, Box::new(move || Inner::fire(&shared, seq)));
                    state.pending = Some(handle);
                    None
                }
                _ => {
                    // Idle (or the window lapsed with the trailing timer
                    // still queued): run on the leading edge.
                    if let Some(handle) = state.pending.take() {
                        inner.scheduler.cancel(&handle);
                        state.seq = state.seq.wrapping_add(1);
                        state.last_args = None;
                    }
                    state.last_run = Some(now);
                    Some(args)
                }
            }
        };

        if let Some(args) = leading {
            tracing::trace!("throttle: leading-edge run");
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
            // The new window starts at the trailing run's own fire time.
            state.last_run = Some(this.scheduler.now());
            state.last_args.take()
        };

        if let Some(args) = args {
            tracing::trace!("throttle: trailing run");
            (this.func)(args);
        }
    }
}

impl<S: Scheduler, A: Send + 'static> Clone for Throttle<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
