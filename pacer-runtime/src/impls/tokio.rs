// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Tokio-backed [`Scheduler`] implementation.
//!
//! Each scheduled callback runs on a spawned task after a
//! `tokio::time::sleep`; cancellation aborts the task. Because the
//! implementation goes through `tokio::time`, it honours
//! `tokio::time::pause`/`advance` in tests.

#[cfg(feature = "runtime-tokio")]
use core::time::Duration;

#[cfg(feature = "runtime-tokio")]
use crate::scheduler::{Callback, Scheduler};

/// [`Scheduler`] backed by the ambient Tokio runtime.
///
/// `schedule_after` must be called from within a Tokio runtime context;
/// the scheduled callback runs on a worker of that runtime.
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

#[cfg(feature = "runtime-tokio")]
impl Scheduler for TokioScheduler {
    type Handle = tokio::task::JoinHandle<()>;

    type Instant = tokio::time::Instant;

    fn schedule_after(&self, delay: Duration, callback: Callback) -> Self::Handle {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        })
    }

    fn cancel(&self, handle: &Self::Handle) {
        handle.abort();
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}
