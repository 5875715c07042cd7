// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Pacer
//!
//! Temporal function combinators and a chainable function registry.
//!
//! ## Overview
//!
//! Pacer provides two independent pieces:
//!
//! - **Temporal combinators** — [`Debounce`], [`Throttle`], [`RunOnce`] and
//!   [`poll`] each wrap a caller-supplied function with timing/state logic
//!   and hand back a gated callable. All waiting is expressed through an
//!   injected [`Scheduler`] capability, never through a hardcoded global
//!   timer, so production code runs on the Tokio scheduler while tests
//!   drive a deterministic virtual clock.
//! - **Registry** — a constructible namespace of named functions. One
//!   [`register`](Registry::register) call installs both a plain variant
//!   and a chainable variant of every function a source contributes, and
//!   keeps the two surfaces in sync under re-registration.
//!
//! The combinators do not depend on the Registry and vice versa; they
//! compose only in that a combinator's `call` may itself be registered as
//! a named function.
//!
//! ## Quick Start
//!
//! ```rust
//! use core::time::Duration;
//! use pacer::Debounce;
//! use pacer_test_utils::ManualScheduler;
//!
//! let scheduler = ManualScheduler::new();
//! let debounced = Debounce::new(scheduler.clone(), |n: u32| println!("{n}"), Duration::from_millis(100), false);
//!
//! debounced.call(1);
//! debounced.call(2);
//! scheduler.advance(Duration::from_millis(100)); // prints "2", once
//! ```

pub mod chain;
pub mod debounce;
pub mod poll;
pub mod registry;
pub mod run_once;
pub mod throttle;

pub use self::chain::Chain;
pub use self::debounce::Debounce;
pub use self::poll::{poll, PollOptions, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};
pub use self::registry::{Extension, FunctionSet, NativeFn, Registry, Value};
pub use self::run_once::RunOnce;
pub use self::throttle::{Throttle, DEFAULT_THROTTLE_WAIT};

// Re-export the capability and core types callers need at the seams.
pub use pacer_core::{CancellationToken, PacerError, Result};
pub use pacer_runtime::{Callback, Scheduler};

#[cfg(feature = "runtime-tokio")]
pub use pacer_runtime::impls::tokio::TokioScheduler;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{poll, Debounce, PollOptions, Registry, RunOnce, Throttle};
    pub use pacer_core::{CancellationToken, PacerError, Result};
    pub use pacer_runtime::Scheduler;
}
