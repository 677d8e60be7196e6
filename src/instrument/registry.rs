// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Instrumentation registry.
//!
//! Records, before any call is made, which methods are asynchronous and which
//! parameter positions are captured. A registry is built once per instrumented
//! type (usually in a `Lazy` static) and read-only afterwards:
//!
//! ```rust,ignore
//! static INSTRUMENTATION: Lazy<Result<InstrumentationRegistry, InstrumentError>> = Lazy::new(|| {
//!     let mut registry = InstrumentationRegistry::new();
//!     registry
//!         .declare(MethodIdentity::of::<Reader>("query"), 3)
//!         .asynchronous()
//!         .trace_param(0)
//!         .register()?;
//!     Ok(registry)
//! });
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::InstrumentError;

use super::identity::{MethodIdentity, ParameterIdentity};
use super::log::TraceLog;

/// Explicit wrapper configuration for one method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodConfig {
    /// Whether the wrapped call completes asynchronously.
    pub is_async: bool,
    /// Zero-based positions whose values are captured.
    pub traced_params: BTreeSet<usize>,
}

impl MethodConfig {
    /// Synchronous method with no captured parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the method asynchronous.
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Capture the parameter at `position`.
    pub fn trace_param(mut self, position: usize) -> Self {
        self.traced_params.insert(position);
        self
    }

    pub fn traces_param(&self, position: usize) -> bool {
        self.traced_params.contains(&position)
    }
}

/// Registry of async methods and traced parameters.
#[derive(Debug, Default)]
pub struct InstrumentationRegistry {
    async_methods: HashSet<MethodIdentity>,
    traced_params: HashSet<ParameterIdentity>,
    declared: HashMap<MethodIdentity, usize>,
}

impl InstrumentationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a method asynchronous. Idempotent.
    pub fn register_async_method(&mut self, method: MethodIdentity) -> &mut Self {
        if self.async_methods.insert(method) {
            tracing::trace!(method = %method, "Registered async method");
        }
        self
    }

    /// Mark a parameter for value capture. Idempotent.
    pub fn register_traced_parameter(&mut self, param: ParameterIdentity) -> &mut Self {
        if self.traced_params.insert(param) {
            tracing::trace!(param = %param, "Registered traced parameter");
        }
        self
    }

    pub fn is_async_method(&self, method: &MethodIdentity) -> bool {
        self.async_methods.contains(method)
    }

    pub fn is_traced_parameter(&self, param: &ParameterIdentity) -> bool {
        self.traced_params.contains(param)
    }

    /// Whether the method went through [`declare`](Self::declare).
    pub fn is_declared(&self, method: &MethodIdentity) -> bool {
        self.declared.contains_key(method)
    }

    /// Declared arity of a method.
    pub fn arity(&self, method: &MethodIdentity) -> Option<usize> {
        self.declared.get(method).copied()
    }

    /// Start declaring a method with `arity` positional parameters.
    pub fn declare(&mut self, method: MethodIdentity, arity: usize) -> MethodDeclaration<'_> {
        MethodDeclaration {
            registry: self,
            method,
            arity,
            is_async: false,
            traced_params: BTreeSet::new(),
        }
    }

    /// Project the registry's view of `method` into an explicit config.
    ///
    /// Unknown methods are synchronous with nothing captured.
    pub fn method_config(&self, method: &MethodIdentity) -> MethodConfig {
        let traced_params = self
            .traced_params
            .iter()
            .filter(|param| param.method() == method)
            .map(ParameterIdentity::position)
            .collect();

        MethodConfig {
            is_async: self.is_async_method(method),
            traced_params,
        }
    }

    /// Like [`method_config`](Self::method_config), but only for methods that
    /// went through [`declare`](Self::declare).
    pub fn try_method_config(&self, method: &MethodIdentity) -> Result<MethodConfig, InstrumentError> {
        if !self.is_declared(method) {
            return Err(InstrumentError::NotInstrumented(method.to_string()));
        }
        Ok(self.method_config(method))
    }

    /// Fresh, empty trace log for a newly constructed instance.
    pub fn initialize_trace_log(&self) -> TraceLog {
        TraceLog::new()
    }
}

/// Builder returned by [`InstrumentationRegistry::declare`].
#[must_use = "a declaration does nothing until `register` is called"]
pub struct MethodDeclaration<'r> {
    registry: &'r mut InstrumentationRegistry,
    method: MethodIdentity,
    arity: usize,
    is_async: bool,
    traced_params: BTreeSet<usize>,
}

impl MethodDeclaration<'_> {
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn trace_param(mut self, position: usize) -> Self {
        self.traced_params.insert(position);
        self
    }

    /// Validate and commit the declaration.
    pub fn register(self) -> Result<(), InstrumentError> {
        if let Some(&position) = self.traced_params.iter().find(|&&p| p >= self.arity) {
            return Err(InstrumentError::InvalidDeclaration {
                method: self.method.to_string(),
                position,
                arity: self.arity,
            });
        }

        if let Some(&first) = self.registry.declared.get(&self.method) {
            if first != self.arity {
                return Err(InstrumentError::ConflictingArity {
                    method: self.method.to_string(),
                    first,
                    second: self.arity,
                });
            }
        }

        self.registry.declared.insert(self.method, self.arity);
        if self.is_async {
            self.registry.register_async_method(self.method);
        }
        for position in self.traced_params {
            self.registry
                .register_traced_parameter(self.method.param(position));
        }

        tracing::debug!(method = %self.method, arity = self.arity, "Declared instrumented method");
        Ok(())
    }
}
