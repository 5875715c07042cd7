// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pacer_core::Result;

use crate::registry::{Registry, Value};

/// Container returned by the chainable surface, enabling further calls on
/// an intermediate result.
///
/// Each [`invoke`](Chain::invoke) feeds the contained value back in as the
/// next function's chain subject; [`into_inner`](Chain::into_inner)
/// unwraps the final value.
///
/// # Example
///
/// ```
/// use pacer::{FunctionSet, Registry, Value};
///
/// let registry = Registry::new();
/// registry
///     .register(
///         &FunctionSet::new()
///             .with("inc", |args| {
///                 Ok(Value::from(args.first().and_then(Value::as_i64).unwrap_or(0) + 1))
///             })
///             .with("double", |args| {
///                 Ok(Value::from(args.first().and_then(Value::as_i64).unwrap_or(0) * 2))
///             }),
///     )
///     .unwrap();
///
/// let result = registry
///     .invoke_chainable("inc", Value::from(20), &[])
///     .unwrap()
///     .invoke("double", &[])
///     .unwrap()
///     .into_inner();
/// assert_eq!(result, Value::from(42));
/// ```
pub struct Chain<'r> {
    registry: &'r Registry,
    value: Value,
}

impl<'r> Chain<'r> {
    pub(crate) fn new(registry: &'r Registry, value: Value) -> Self {
        Self { registry, value }
    }

    /// Invoke the next function in the chain, with the contained value as
    /// its subject.
    ///
    /// # Errors
    ///
    /// [`PacerError::NotFound`](pacer_core::PacerError::NotFound) if
    /// nothing is registered under `name`; otherwise whatever the function
    /// itself returns.
    pub fn invoke(self, name: &str, args: &[Value]) -> Result<Self> {
        self.registry.invoke_chainable(name, self.value, args)
    }

    /// The contained value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwrap the contained value.
    pub fn into_inner(self) -> Value {
        self.value
    }
}
