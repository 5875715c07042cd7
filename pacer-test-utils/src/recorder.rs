// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;

/// Shared recorder for the invocations a wrapped function receives.
///
/// Clones share the same underlying buffer, so a test can hand one clone
/// to the closure under test and keep another for assertions.
pub struct CallRecorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> CallRecorder<T> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record one invocation.
    pub fn record(&self, value: T) {
        self.calls.lock().push(value);
    }

    /// Number of recorded invocations.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The most recent recorded value, if any.
    pub fn last(&self) -> Option<T> {
        self.calls.lock().last().cloned()
    }

    /// All recorded values, in invocation order.
    pub fn values(&self) -> Vec<T> {
        self.calls.lock().clone()
    }
}

impl<T: Clone> Default for CallRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CallRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}
