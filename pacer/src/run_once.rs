// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `run-once` combinator.

use parking_lot::Mutex;
use std::sync::Arc;

/// Wrapper that runs its function at most once and caches the result.
///
/// The first [`call`](RunOnce::call) runs the function, caches the return
/// value and drops the function, releasing any state its closure captured.
/// Every call thereafter returns a clone of the cached value with no side
/// effects. Clones share the once-state.
///
/// Re-entrancy: calling `call` from inside the wrapped function deadlocks,
/// since the once-state is held for the duration of the first run.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use pacer::RunOnce;
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// let observed = Arc::clone(&counter);
/// let once = RunOnce::new(move || observed.fetch_add(1, Ordering::SeqCst) + 1);
///
/// assert_eq!(once.call(), 1);
/// assert_eq!(once.call(), 1);
/// assert_eq!(counter.load(Ordering::SeqCst), 1);
/// ```
pub struct RunOnce<F, T> {
    state: Arc<Mutex<State<F, T>>>,
}

struct State<F, T> {
    func: Option<F>,
    result: Option<T>,
}

impl<F, T> RunOnce<F, T>
where
    F: FnOnce() -> T,
    T: Clone,
{
    /// Wrap `func` so it runs at most once.
    pub fn new(func: F) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                func: Some(func),
                result: None,
            })),
        }
    }

    /// Run the wrapped function on the first call; return the cached
    /// result on every call.
    pub fn call(&self) -> T {
        let mut state = self.state.lock();

        if let Some(func) = state.func.take() {
            tracing::trace!("run_once: first call, running wrapped function");
            let value = func();
            state.result = Some(value.clone());
            return value;
        }

        match &state.result {
            Some(value) => value.clone(),
            // new() starts with the function present; once taken, the
            // result is set before the lock is released.
            None => unreachable!("run-once state holds either the function or its result"),
        }
    }
}

impl<F, T> Clone for RunOnce<F, T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
