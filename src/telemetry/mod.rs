// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Telemetry, tracing, and metrics infrastructure.
//!
//! This is the process-level observability layer, separate from the
//! per-instance trace logs kept by [`crate::instrument`]:
//!
//! - **Tracing**: Structured logging with one span per intercepted call
//! - **Metrics**: Per-method call counters and latency histograms
//!
//! # Usage
//!
//! Initialize telemetry at application startup:
//!
//! ```rust,ignore
//! use verbosity::telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::default();
//! let _guard = init_telemetry(&config)?;
//! ```

mod init;
pub mod metrics;
mod spans;

pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard};
pub use metrics::{CallMetrics, Histogram, Metrics, MetricsSnapshot, GLOBAL_METRICS};
pub use spans::CallSpan;
