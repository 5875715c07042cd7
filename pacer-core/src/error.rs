// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the pacer library.
//!
//! A single root [`PacerError`] covers every failure mode the library can
//! surface synchronously: malformed registration input, lookup of an
//! unregistered name, and poll deadlines. Errors raised by wrapped user
//! functions inside deferred callbacks are deliberately *not* represented
//! here — combinators are transparent wrappers, not error boundaries, so
//! such failures propagate on the scheduler's execution context.
//!
//! # Examples
//!
//! ```
//! use pacer_core::{PacerError, Result};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(PacerError::not_found(name))
//! }
//! ```

use core::time::Duration;

/// Root error type for all pacer operations.
#[derive(Debug, thiserror::Error)]
pub enum PacerError {
    /// A registration call was handed input it cannot accept, such as a
    /// function under an empty or non-identifier name.
    #[error("Invalid argument: {context}")]
    InvalidArgument {
        /// Description of what was wrong with the input
        context: String,
    },

    /// A registry lookup named a function that was never registered.
    #[error("No function registered under name: {name}")]
    NotFound {
        /// The name that was looked up
        name: String,
    },

    /// A poll session's deadline passed before its condition held.
    ///
    /// Delivered through the session's failure callback, never thrown.
    #[error("Timed out after {elapsed:?} waiting for: {condition}")]
    Timeout {
        /// Human-readable description of the polled condition
        condition: String,
        /// Time between the start of the session and the deadline check
        elapsed: Duration,
    },
}

impl PacerError {
    /// Create an `InvalidArgument` error with the given context.
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
        }
    }

    /// Create a `NotFound` error for the given name.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a `Timeout` error for the given condition description.
    pub fn timeout(condition: impl Into<String>, elapsed: Duration) -> Self {
        Self::Timeout {
            condition: condition.into(),
            elapsed,
        }
    }

    /// Check whether this error indicates a transient failure that could
    /// succeed on retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Specialized `Result` type for pacer operations.
pub type Result<T> = core::result::Result<T, PacerError>;

impl Clone for PacerError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidArgument { context } => Self::InvalidArgument {
                context: context.clone(),
            },
            Self::NotFound { name } => Self::NotFound { name: name.clone() },
            Self::Timeout { condition, elapsed } => Self::Timeout {
                condition: condition.clone(),
                elapsed: *elapsed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_the_condition() {
        let err = PacerError::timeout("queue drained", Duration::from_millis(50));
        let message = err.to_string();
        assert!(message.contains("queue drained"));
        assert!(message.contains("Timed out"));
    }

    #[test]
    fn only_timeouts_are_recoverable() {
        assert!(PacerError::timeout("x", Duration::ZERO).is_recoverable());
        assert!(!PacerError::not_found("x").is_recoverable());
        assert!(!PacerError::invalid_argument("x").is_recoverable());
    }
}
