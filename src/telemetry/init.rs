// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Telemetry initialization and configuration.

use std::io;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::ResolvedConfig;
use crate::error::ConfigError;

/// Configuration for telemetry initialization.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Default log level if RUST_LOG is not set.
    pub default_level: Level,

    /// Whether to include span events (enter/exit).
    pub include_span_events: bool,

    /// Whether to include file/line information.
    pub include_file_line: bool,

    /// Whether to include target module path.
    pub include_target: bool,

    /// Whether to use ANSI colors in output.
    pub ansi_colors: bool,

    /// Whether to use compact log format.
    pub compact: bool,

    /// Custom filter directive (overrides default_level).
    pub filter_directive: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            include_span_events: false,
            include_file_line: false,
            include_target: true,
            ansi_colors: true,
            compact: true,
            filter_directive: None,
        }
    }
}

impl TelemetryConfig {
    /// Create a config suitable for development with verbose output.
    pub fn development() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_span_events: true,
            include_file_line: true,
            include_target: true,
            ansi_colors: true,
            compact: false,
            filter_directive: None,
        }
    }

    /// Create a config suitable for production with minimal output.
    pub fn production() -> Self {
        Self {
            default_level: Level::WARN,
            include_span_events: false,
            include_file_line: false,
            include_target: false,
            ansi_colors: false,
            compact: true,
            filter_directive: None,
        }
    }

    /// Set the default log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Set a custom filter directive.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter_directive = Some(filter.into());
        self
    }

    /// Enable or disable ANSI colors.
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi_colors = ansi;
        self
    }

    /// Enable or disable span enter/close events.
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.include_span_events = enabled;
        self
    }
}

impl TryFrom<&ResolvedConfig> for TelemetryConfig {
    type Error = ConfigError;

    fn try_from(config: &ResolvedConfig) -> Result<Self, Self::Error> {
        let level = Level::from_str(&config.log_level).map_err(|_| {
            ConfigError::invalid_value(
                "logLevel",
                format!("unknown level '{}'", config.log_level),
            )
        })?;

        // Debug and trace runs get file/line and the full format
        let preset = if level >= Level::DEBUG {
            Self::development()
        } else {
            Self::production()
        };

        let mut telemetry = preset
            .with_level(level)
            .with_ansi(config.ansi_colors);
        if let Some(filter) = &config.log_filter {
            telemetry = telemetry.with_filter(filter.clone());
        }
        Ok(telemetry)
    }
}

/// Guard that flushes telemetry on drop.
///
/// Keep this guard alive for the duration of your program.
pub struct TelemetryGuard {
    _private: (),
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        // The fmt layer writes synchronously; nothing to flush yet.
    }
}

/// Initialize telemetry with the given configuration.
///
/// This should be called once at application startup. Logs go to stderr so
/// they never interleave with the trace log printed on stdout.
pub fn init_telemetry(config: &TelemetryConfig) -> io::Result<TelemetryGuard> {
    // RUST_LOG takes precedence unless an explicit directive was given
    let filter = match &config.filter_directive {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| {
            EnvFilter::new(format!("{}", config.default_level))
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}", config.default_level))
        }),
    };

    let span_events = if config.include_span_events {
        FmtSpan::ENTER | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_span_events(span_events);

    if config.compact {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.compact())
            .try_init()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    }

    Ok(TelemetryGuard { _private: () })
}
