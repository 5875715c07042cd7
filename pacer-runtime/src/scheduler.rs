// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The deferred-callback scheduler capability.
//!
//! Every temporal combinator expresses waiting by scheduling a future
//! callback through a [`Scheduler`] injected at construction time, never
//! by blocking or by reaching for a hardcoded global timer. This keeps the
//! combinators runtime-agnostic and lets tests substitute a deterministic
//! virtual clock for wall-clock timers.

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Deferred callback accepted by [`Scheduler::schedule_after`].
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// A deferred-callback scheduler.
///
/// Implementations must run each scheduled callback at most once, no
/// earlier than `delay` after the `schedule_after` call, and never run a
/// callback whose handle was passed to [`cancel`](Scheduler::cancel)
/// before it fired. Callbacks scheduled with a zero delay still run on a
/// later scheduler tick, never synchronously inside `schedule_after`.
///
/// Panics from inside a callback unwind on the scheduler's execution
/// context; they are not routed back to the code that scheduled the
/// callback.
pub trait Scheduler: Clone + Send + Sync + Debug + 'static {
    /// Handle identifying one scheduled callback, usable for cancellation.
    type Handle: Send;

    /// The scheduler's notion of a point in time.
    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Schedule `callback` to run once, `delay` from now.
    fn schedule_after(&self, delay: Duration, callback: Callback) -> Self::Handle;

    /// Cancel a scheduled callback.
    ///
    /// A no-op if the callback already fired or was already cancelled.
    fn cancel(&self, handle: &Self::Handle);

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;
}
