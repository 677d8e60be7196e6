// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Call interceptor.
//!
//! An [`Interceptor`] wraps one method of one instance. Every call records a
//! `started` event, runs the wrapped body, then records `ok` or `failed`.
//! Results and errors pass through unchanged.
//!
//! Calls come in two phases so that arguments can be captured before they are
//! moved into the wrapped body:
//!
//! ```rust,ignore
//! let call = interceptor.start(&call_args![par], CallOptions::default());
//! call.complete_async(async move { load(par).await })
//! ```
//!
//! `started` is recorded by [`Interceptor::start`], i.e. before the returned
//! future is ever polled. The terminal event is recorded before that future
//! resolves. A call whose options set `verbose` records neither `started`
//! nor `ok`; `failed` is recorded regardless.
//!
//! Panics are not caught: a panicking body leaves a `started` event with no
//! terminal event, and the panic propagates.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn, Instrument, Span};

use crate::telemetry::CallSpan;
use crate::types::{CallOptions, TraceEvent, TraceFeature};

use super::args::CallArgs;
use super::identity::MethodIdentity;
use super::log::TraceLog;
use super::registry::MethodConfig;

/// Wrap `method` so its calls are traced into `log` according to `config`.
pub fn wrap_with_tracing(method: MethodIdentity, config: MethodConfig, log: TraceLog) -> Interceptor {
    Interceptor {
        method,
        config: Arc::new(config),
        log,
    }
}

/// Tracing wrapper for one method of one instance.
#[derive(Debug, Clone)]
pub struct Interceptor {
    method: MethodIdentity,
    config: Arc<MethodConfig>,
    log: TraceLog,
}

impl Interceptor {
    pub fn method(&self) -> &MethodIdentity {
        &self.method
    }

    pub fn config(&self) -> &MethodConfig {
        &self.config
    }

    /// The log this interceptor appends to.
    pub fn log(&self) -> &TraceLog {
        &self.log
    }

    /// Begin a call: capture traced arguments and record `started`.
    pub fn start(&self, args: &CallArgs<'_>, options: CallOptions) -> ActiveCall {
        let suppressed = options.suppresses_trace();
        let span = CallSpan::start(&self.method.to_string(), self.config.is_async, suppressed);

        if suppressed {
            debug!(parent: span.span(), "Trace suppressed for call");
        } else {
            let data = args.capture(&self.config);
            debug!(parent: span.span(), captured = data.len(), "Call started");
            self.log.append(TraceEvent::started(self.method.method(), data));
        }

        ActiveCall {
            method: self.method,
            is_async: self.config.is_async,
            suppressed,
            log: self.log.clone(),
            span: Some(span),
        }
    }

    /// Trace an infallible synchronous call.
    pub fn call<R>(&self, args: &CallArgs<'_>, options: CallOptions, body: impl FnOnce() -> R) -> R {
        let call = self.start(args, options);
        call.complete(body())
    }

    /// Trace a fallible synchronous call; `Err` is recorded as `failed`.
    pub fn try_call<T, E: Display>(
        &self,
        args: &CallArgs<'_>,
        options: CallOptions,
        body: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let call = self.start(args, options);
        call.complete_result(body())
    }

    /// Trace an asynchronous call.
    ///
    /// `started` is recorded immediately; the terminal event when `body`
    /// settles.
    pub fn call_async<F, T, E>(
        &self,
        args: &CallArgs<'_>,
        options: CallOptions,
        body: F,
    ) -> impl Future<Output = Result<T, E>>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.start(args, options).complete_async(body)
    }
}

/// A call that has started and not yet been settled.
///
/// Dropping it unsettled (panic, or an abandoned future) records nothing.
#[derive(Debug)]
#[must_use = "a started call must be completed to record its terminal event"]
pub struct ActiveCall {
    method: MethodIdentity,
    is_async: bool,
    suppressed: bool,
    log: TraceLog,
    span: Option<CallSpan>,
}

impl ActiveCall {
    /// Whether `started`/`ok` are suppressed for this call.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Settle a synchronous call with a plain value.
    pub fn complete<R>(mut self, value: R) -> R {
        if self.is_async {
            warn!(method = %self.method, "Async method completed through the synchronous path");
        }
        self.record_ok();
        value
    }

    /// Settle a synchronous call with a result.
    pub fn complete_result<T, E: Display>(mut self, result: Result<T, E>) -> Result<T, E> {
        if self.is_async {
            warn!(method = %self.method, "Async method completed through the synchronous path");
        }
        match &result {
            Ok(_) => self.record_ok(),
            Err(err) => self.record_failed(err),
        }
        result
    }

    /// Settle an asynchronous call once `body` resolves.
    pub fn complete_async<F, T, E>(self, body: F) -> impl Future<Output = Result<T, E>>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        if !self.is_async {
            warn!(method = %self.method, "Synchronous method completed through the async path");
        }
        let span = self
            .span
            .as_ref()
            .map(|span| span.span().clone())
            .unwrap_or_else(Span::none);

        let mut call = self;
        async move {
            let result = body.instrument(span).await;
            match &result {
                Ok(_) => call.record_ok(),
                Err(err) => call.record_failed(err),
            }
            result
        }
    }

    /// `feature: "async"` follows the method's configuration, not the
    /// completion path.
    fn record_ok(&mut self) {
        if !self.suppressed {
            let feature = self.is_async.then_some(TraceFeature::Async);
            self.log.append(TraceEvent::ok(self.method.method(), feature));
        }
        self.finish(true);
    }

    fn record_failed<E: Display>(&mut self, err: &E) {
        // Failures are recorded even for suppressed calls.
        self.log
            .append(TraceEvent::failed(self.method.method(), error_payload(err)));
        if let Some(span) = &self.span {
            debug!(parent: span.span(), error = %err, "Call failed");
        }
        self.finish(false);
    }

    fn finish(&mut self, success: bool) {
        if let Some(span) = self.span.take() {
            span.finish(success, self.suppressed);
        }
    }
}

impl Drop for ActiveCall {
    fn drop(&mut self) {
        if let Some(span) = &self.span {
            warn!(
                parent: span.span(),
                method = %self.method,
                "Call ended without a terminal trace event"
            );
        }
    }
}

fn error_payload<E: Display>(err: &E) -> Value {
    Value::String(err.to_string())
}
