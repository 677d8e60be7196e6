// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Call instrumentation engine.
//!
//! # Architecture
//!
//! - [`InstrumentationRegistry`] - which methods are async and which
//!   parameter positions are captured, keyed by [`MethodIdentity`]
//! - [`Interceptor`] - wraps one method of one instance and appends
//!   [`TraceEvent`](crate::types::TraceEvent)s to a [`TraceLog`]
//! - [`CallArgs`] / [`call_args!`](crate::call_args) - positional arguments
//!   as seen by the interceptor
//!
//! # Example
//!
//! ```rust,ignore
//! use verbosity::call_args;
//! use verbosity::instrument::{wrap_with_tracing, MethodConfig, MethodIdentity, TraceLog};
//! use verbosity::types::CallOptions;
//!
//! let log = TraceLog::new();
//! let sum = wrap_with_tracing(
//!     MethodIdentity::of::<Calculator>("sum"),
//!     MethodConfig::new().trace_param(0),
//!     log.clone(),
//! );
//!
//! let total = sum.call(&call_args![a, b], CallOptions::default(), || a + b);
//! ```

mod args;
mod identity;
mod interceptor;
mod log;
mod registry;

pub use args::{CallArgs, TraceValue};
pub use identity::{MethodIdentity, ParameterIdentity};
pub use interceptor::{wrap_with_tracing, ActiveCall, Interceptor};
pub use log::TraceLog;
pub use registry::{InstrumentationRegistry, MethodConfig, MethodDeclaration};
