// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Span helpers for consistent instrumentation.

use std::time::{Duration, Instant};
use tracing::{debug_span, Span};

/// RAII guard for timing one intercepted call.
///
/// Records the method, duration, and success/failure to metrics.
#[derive(Debug)]
pub struct CallSpan {
    method: String,
    start: Instant,
    span: Span,
}

impl CallSpan {
    /// Start a new call span.
    pub fn start(method: &str, is_async: bool, suppressed: bool) -> Self {
        let span = debug_span!(
            "call",
            method = %method,
            is_async,
            suppressed,
            duration_ms = tracing::field::Empty,
            success = tracing::field::Empty,
        );

        Self {
            method: method.to_string(),
            start: Instant::now(),
            span,
        }
    }

    /// Get the underlying tracing span.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Get elapsed time so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finish the span, recording duration and success.
    pub fn finish(self, success: bool, suppressed: bool) -> Duration {
        let duration = self.start.elapsed();

        self.span.record("duration_ms", duration.as_secs_f64() * 1000.0);
        self.span.record("success", success);

        #[cfg(feature = "telemetry")]
        super::metrics::GLOBAL_METRICS.record_call(&self.method, duration, success, suppressed);
        #[cfg(not(feature = "telemetry"))]
        let _ = suppressed;

        tracing::debug!(parent: &self.span, success, "Call complete");
        duration
    }
}
