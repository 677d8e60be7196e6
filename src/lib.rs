// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Verbosity - call-tracing instrumentation.
//!
//! Wraps methods so every call records a `started` event and a terminal
//! `ok`/`failed` event in a per-instance trace log, with opt-in capture of
//! individual parameters and a per-call option to suppress normal events.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`types`] - Trace event types and per-call options
//! - [`error`] - Error types and result aliases
//! - [`instrument`] - Registry, interceptor, and trace log
//! - [`reader`] - A fake data reader whose methods are instrumented
//! - [`config`] - Configuration loading and merging
//! - [`telemetry`] - Structured logging and call metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use verbosity::reader::{DataPackageQuery, FakeDdfCsvReader};
//! use verbosity::types::CallOptions;
//!
//! let reader = FakeDdfCsvReader::new(false)?;
//! reader.query(DataPackageQuery::select("concepts"), false, CallOptions::default()).await?;
//! reader.query(DataPackageQuery::select("concepts"), false, CallOptions::verbose()).await?;
//!
//! for event in reader.verbosity_data() {
//!     println!("{}", event.format_line());
//! }
//! ```

pub mod config;
pub mod error;
pub mod instrument;
pub mod reader;
pub mod telemetry;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ConfigError, InstrumentError, ReaderError, Result};
pub use instrument::{
    wrap_with_tracing, CallArgs, InstrumentationRegistry, Interceptor, MethodConfig,
    MethodIdentity, TraceLog,
};
pub use types::{CallOptions, ParamCapture, TraceEvent, TraceFeature, TraceStatus};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_public_exports() {
        let _log = TraceLog::new();
        let _options = CallOptions::verbose();
        let _config = MethodConfig::new().asynchronous();
    }
}
