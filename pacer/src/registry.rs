// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Named-function registry with a chainable secondary surface.
//!
//! A [`Registry`] maps names to dynamic functions. Registering a source
//! installs every function it contributes on two surfaces at once:
//!
//! - the **plain** surface, invoked through
//!   [`invoke_plain`](Registry::invoke_plain), which passes the argument
//!   list straight through, and
//! - the **chainable** surface, invoked through
//!   [`invoke_chainable`](Registry::invoke_chainable), whose wrapper binds
//!   a chain subject as the implicit first argument and wraps the result
//!   in a [`Chain`] container for further calls.
//!
//! The two surfaces are always in sync: re-registering a name overwrites
//! both variants inside one write-lock section, so a lookup never observes
//! a fresh plain function next to a stale chainable wrapper. Entries
//! persist for the life of the registry; there is no removal.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use pacer_core::{PacerError, Result};

use crate::chain::Chain;

/// Dynamic value passed to and returned from registered functions.
pub type Value = serde_json::Value;

/// A registered function on the plain surface.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// Chainable variant: subject plus explicitly passed arguments.
pub(crate) type ChainFn = Arc<dyn Fn(Value, &[Value]) -> Result<Value> + Send + Sync>;

/// A source of named functions for [`Registry::register`].
pub trait Extension {
    /// Enumerate the callable members this source contributes.
    ///
    /// Order does not matter; the registry applies entries in sorted-name
    /// order so one registration is deterministic regardless of how the
    /// source enumerates itself.
    fn functions(&self) -> Vec<(String, NativeFn)>;
}

/// Convenience [`Extension`] built by chaining [`with`](FunctionSet::with)
/// calls.
///
/// # Example
///
/// ```
/// use pacer::{FunctionSet, Registry, Value};
///
/// let registry = Registry::new();
/// registry
///     .register(&FunctionSet::new().with("double", |args| {
///         let n = args.first().and_then(Value::as_i64).unwrap_or(0);
///         Ok(Value::from(n * 2))
///     }))
///     .unwrap();
///
/// assert_eq!(registry.invoke_plain("double", &[Value::from(21)]).unwrap(), Value::from(42));
/// ```
#[derive(Clone, Default)]
pub struct FunctionSet {
    entries: Vec<(String, NativeFn)>,
}

impl FunctionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named function to the set.
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.entries.push((name.into(), Arc::new(func)));
        self
    }
}

impl Extension for FunctionSet {
    fn functions(&self) -> Vec<(String, NativeFn)> {
        self.entries.clone()
    }
}

struct Surfaces {
    plain: HashMap<String, NativeFn>,
    chainable: HashMap<String, ChainFn>,
}

/// A constructible namespace of named functions.
///
/// Registries are explicit instances so tests get a fresh one each;
/// [`Registry::global`] offers a process-wide default for hosts that want
/// the original load-time-namespace convenience.
pub struct Registry {
    surfaces: RwLock<Surfaces>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            surfaces: RwLock::new(Surfaces {
                plain: HashMap::new(),
                chainable: HashMap::new(),
            }),
        }
    }

    /// The process-wide default instance.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Copy every function the source contributes onto both surfaces.
    ///
    /// Entries are validated up front and applied in sorted-name order
    /// under a single write lock: either the whole batch lands or none of
    /// it does, and re-registering a name overwrites both variants
    /// together. A source contributing no functions is a no-op.
    ///
    /// # Errors
    ///
    /// [`PacerError::InvalidArgument`] if any contributed name is empty or
    /// not an identifier; the registry is left untouched.
    pub fn register(&self, source: &dyn Extension) -> Result<()> {
        let mut entries = source.functions();
        for (name, _) in &entries {
            validate_name(name)?;
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut surfaces = self.surfaces.write();
        for (name, func) in entries {
            tracing::debug!(name = %name, "registry: installing function");
            let chainable = chain_variant(&func);
            surfaces.plain.insert(name.clone(), func);
            surfaces.chainable.insert(name, chainable);
        }
        Ok(())
    }

    /// Invoke a registered function on the plain surface.
    ///
    /// # Errors
    ///
    /// [`PacerError::NotFound`] if nothing is registered under `name`;
    /// otherwise whatever the function itself returns.
    pub fn invoke_plain(&self, name: &str, args: &[Value]) -> Result<Value> {
        let func = self
            .surfaces
            .read()
            .plain
            .get(name)
            .cloned()
            .ok_or_else(|| PacerError::not_found(name))?;
        func(args)
    }

    /// Invoke a registered function on the chainable surface.
    ///
    /// `subject` is bound as the implicit first argument ahead of `args`;
    /// the raw result comes back wrapped in a [`Chain`] for further calls.
    ///
    /// # Errors
    ///
    /// [`PacerError::NotFound`] if nothing is registered under `name`;
    /// otherwise whatever the function itself returns.
    pub fn invoke_chainable(&self, name: &str, subject: Value, args: &[Value]) -> Result<Chain<'_>> {
        let func = self
            .surfaces
            .read()
            .chainable
            .get(name)
            .cloned()
            .ok_or_else(|| PacerError::not_found(name))?;
        let value = func(subject, args)?;
        Ok(Chain::new(self, value))
    }

    /// Sorted names of all registered functions.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.surfaces.read().plain.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether a function is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.surfaces.read().plain.contains_key(name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn chain_variant(func: &NativeFn) -> ChainFn {
    let func = Arc::clone(func);
    Arc::new(move |subject: Value, args: &[Value]| {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(subject);
        full.extend_from_slice(args);
        func(&full)
    })
}

fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let leading_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if leading_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(PacerError::invalid_argument(format!(
            "function name {name:?} is not an identifier"
        )))
    }
}
