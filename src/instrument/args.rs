// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Positional call arguments as seen by the interceptor.
//!
//! Arguments are held by reference and only converted to JSON when their
//! position is marked for capture, so untraced values are never serialized.

use serde::Serialize;
use serde_json::Value;

use crate::types::ParamCapture;

use super::registry::MethodConfig;

/// A value that can be recorded in a trace event.
pub trait TraceValue {
    /// Convert to the JSON form stored in the trace log.
    fn trace_value(&self) -> Value;
}

impl<T: Serialize> TraceValue for T {
    fn trace_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Traced argument could not be serialized");
            Value::String(format!("<unserializable: {err}>"))
        })
    }
}

/// Borrowed positional arguments of one call.
#[derive(Default)]
pub struct CallArgs<'a> {
    values: Vec<&'a dyn TraceValue>,
}

impl<'a> CallArgs<'a> {
    /// No arguments.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append the next positional argument.
    pub fn arg(mut self, value: &'a dyn TraceValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Capture every argument whose position is traced, in call order.
    pub fn capture(&self, config: &MethodConfig) -> Vec<ParamCapture> {
        self.values
            .iter()
            .enumerate()
            .filter(|(position, _)| config.traces_param(*position))
            .map(|(position, value)| ParamCapture::new(position, value.trace_value()))
            .collect()
    }
}

impl<'a> From<Vec<&'a dyn TraceValue>> for CallArgs<'a> {
    fn from(values: Vec<&'a dyn TraceValue>) -> Self {
        Self { values }
    }
}

/// Build [`CallArgs`] from a list of argument expressions.
///
/// # Example
///
/// ```rust,ignore
/// let args = call_args![par, is_rejection_needed, options];
/// ```
#[macro_export]
macro_rules! call_args {
    () => {
        $crate::instrument::CallArgs::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::instrument::CallArgs::from(
            ::std::vec![$(&$arg as &dyn $crate::instrument::TraceValue),+]
        )
    };
}
