// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `poll` combinator.
//!
//! A poll session repeatedly evaluates a condition function until it holds
//! or a deadline passes, then fires exactly one of two callbacks exactly
//! once. The session state machine is:
//!
//! - `Polling` → `Succeeded` when the condition returns true
//! - `Polling` → `Polling` (reschedule) when it returns false before the
//!   deadline
//! - `Polling` → `TimedOut` when it returns false and the deadline passed
//! - `Polling` → `Cancelled` when the returned token is cancelled
//!
//! `Succeeded`, `TimedOut` and `Cancelled` are terminal: no further
//! evaluation happens and no callback fires after reaching them.

use core::time::Duration;
use parking_lot::Mutex;
use std::sync::Arc;

use pacer_core::{CancellationToken, PacerError};
use pacer_runtime::Scheduler;

/// Deadline applied when [`PollOptions::default`] is used.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(2000);

/// Re-evaluation spacing applied when [`PollOptions::default`] is used.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timing parameters and diagnostics for one poll session.
#[derive(Clone, Debug)]
pub struct PollOptions {
    /// How long the condition may keep failing before the session times
    /// out. The deadline is computed once, when [`poll`] is called. Zero
    /// selects [`DEFAULT_POLL_TIMEOUT`].
    pub timeout: Duration,
    /// Spacing between condition evaluations. Zero selects
    /// [`DEFAULT_POLL_INTERVAL`]; a session never reschedules at the same
    /// instant it just evaluated at.
    pub interval: Duration,
    /// Human-readable description of the condition, carried by the
    /// timeout error.
    pub description: String,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_POLL_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
            description: "condition".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PollState {
    Polling,
    Succeeded,
    TimedOut,
    Cancelled,
}

struct Session<S: Scheduler, C> {
    scheduler: S,
    condition: C,
    interval: Duration,
    description: String,
    started: S::Instant,
    deadline: S::Instant,
    token: CancellationToken,
    outcome: Mutex<Outcome>,
}

struct Outcome {
    state: PollState,
    on_success: Option<Box<dyn FnOnce() + Send>>,
    on_failure: Option<Box<dyn FnOnce(PacerError) + Send>>,
}

/// Start a poll session: evaluate `condition` now and then every
/// `options.interval` until it holds or `options.timeout` passes.
///
/// On success `on_success` fires exactly once; if the deadline passes
/// first, `on_failure` fires exactly once with a
/// [`PacerError::Timeout`] naming the condition and the elapsed time.
/// Never both, never twice.
///
/// The returned [`CancellationToken`] stops the session: after
/// `cancel()`, no further evaluation happens and neither callback fires.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use pacer::{poll, PollOptions};
/// use pacer_test_utils::ManualScheduler;
///
/// let scheduler = ManualScheduler::new();
/// let counter = Arc::new(AtomicUsize::new(0));
///
/// let watched = Arc::clone(&counter);
/// let done = Arc::new(AtomicUsize::new(0));
/// let on_done = Arc::clone(&done);
/// let _token = poll(
///     &scheduler,
///     move || watched.load(Ordering::SeqCst) >= 3,
///     move || { on_done.fetch_add(1, Ordering::SeqCst); },
///     |_err| panic!("should not time out"),
///     PollOptions { timeout: Duration::from_secs(1), interval: Duration::from_millis(10), ..Default::default() },
/// );
///
/// counter.store(3, Ordering::SeqCst);
/// scheduler.advance(Duration::from_millis(10));
/// assert_eq!(done.load(Ordering::SeqCst), 1);
/// ```
pub fn poll<S, C, FS, FF>(
    scheduler: &S,
    condition: C,
    on_success: FS,
    on_failure: FF,
    options: PollOptions,
) -> CancellationToken
where
    S: Scheduler,
    C: Fn() -> bool + Send + Sync + 'static,
    FS: FnOnce() + Send + 'static,
    FF: FnOnce(PacerError) + Send + 'static,
{
    let token = CancellationToken::new();
    let started = scheduler.now();

    // Zero timing values select the defaults, like throttle's zero wait.
    let interval = if options.interval.is_zero() {
        DEFAULT_POLL_INTERVAL
    } else {
        options.interval
    };
    let timeout = if options.timeout.is_zero() {
        DEFAULT_POLL_TIMEOUT
    } else {
        options.timeout
    };

    let session = Arc::new(Session {
        scheduler: scheduler.clone(),
        condition,
        interval,
        description: options.description,
        started,
        deadline: started + timeout,
        token: token.clone(),
        outcome: Mutex::new(Outcome {
            state: PollState::Polling,
            on_success: Some(Box::new(on_success)),
            on_failure: Some(Box::new(on_failure)),
        }),
    });

    // First evaluation is synchronous, at call time.
    Session::step(&session);
    token
}

impl<S, C> Session<S, C>
where
    S: Scheduler,
    C: Fn() -> bool + Send + Sync + 'static,
{
    fn step(this: &Arc<Self>) {
        if this.token.is_cancelled() {
            let mut outcome = this.outcome.lock();
            if outcome.state == PollState::Polling {
                tracing::debug!(condition = %this.description, "poll: cancelled");
                outcome.state = PollState::Cancelled;
                outcome.on_success = None;
                outcome.on_failure = None;
            }
            return;
        }

        if this.outcome.lock().state != PollState::Polling {
            return;
        }

        if (this.condition)() {
            let on_success = {
                let mut outcome = this.outcome.lock();
                if outcome.state != PollState::Polling {
                    return;
                }
                outcome.state = PollState::Succeeded;
                outcome.on_failure = None;
                outcome.on_success.take()
            };
            tracing::debug!(condition = %this.description, "poll: condition held");
            if let Some(callback) = on_success {
                callback();
            }
        } else if this.scheduler.now() < this.deadline {
            let shared = Arc::clone(this);
            tracing::trace!(
                condition = %this.description,
                interval = ?this.interval,
                "poll: condition not yet true, rescheduling"
            );
            this.scheduler
                .schedule_after(this.interval, Box::new(move || Self::step(&shared)));
        } else {
            let elapsed = this.scheduler.now() - this.started;
            let on_failure = {
                let mut outcome = this.outcome.lock();
                if outcome.state != PollState::Polling {
                    return;
                }
                outcome.state = PollState::TimedOut;
                outcome.on_success = None;
                outcome.on_failure.take()
            };
            tracing::debug!(condition = %this.description, ?elapsed, "poll: deadline passed");
            if let Some(callback) = on_failure {
                callback(PacerError::timeout(this.description.as_str(), elapsed));
            }
        }
    }
}
