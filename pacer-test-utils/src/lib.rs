// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the pacer workspace.
//!
//! The centrepiece is [`ManualScheduler`], a deterministic virtual-clock
//! implementation of the [`Scheduler`](pacer_runtime::Scheduler) capability:
//! time only moves when a test calls `advance`, so combinator behaviour can
//! be asserted tick by tick with no wall-clock timers and no runtime.
//!
//! [`CallRecorder`] complements it by capturing the invocations a wrapped
//! function receives, so tests can assert on call counts and arguments.
//!
//! This crate is for development and testing only, not for production code.

pub mod manual_scheduler;
pub mod recorder;

pub use self::manual_scheduler::ManualScheduler;
pub use self::recorder::CallRecorder;
