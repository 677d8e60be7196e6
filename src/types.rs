// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Core type definitions for trace data.
//!
//! A [`TraceEvent`] is one lifecycle transition of an intercepted call. The
//! serialized shape is camelCase with absent optional fields omitted:
//!
//! ```json
//! { "method": "query", "status": "started", "data": [{ "paramPosition": 0, "value": {} }], "time": "2026-01-01T00:00:00.000Z" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Trace Events
// ============================================================================

/// Lifecycle status of an intercepted call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStatus {
    Started,
    Ok,
    Failed,
}

impl TraceStatus {
    /// Whether this status ends a call.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ok | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Ok => "ok",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra marker attached to terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceFeature {
    /// The call completed through the asynchronous path.
    Async,
}

/// A captured argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamCapture {
    /// Zero-based argument position.
    pub param_position: usize,
    /// Argument value at call time.
    pub value: Value,
}

impl ParamCapture {
    pub fn new(param_position: usize, value: Value) -> Self {
        Self {
            param_position,
            value,
        }
    }
}

/// One record of a call lifecycle transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEvent {
    /// Name of the intercepted method.
    pub method: String,

    /// Lifecycle status.
    pub status: TraceStatus,

    /// Captured arguments; present on `started` events only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ParamCapture>>,

    /// Present on `ok` events of asynchronous calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<TraceFeature>,

    /// Failure payload; present on `failed` events only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    /// Wall-clock instant of emission.
    #[serde(with = "iso_millis")]
    pub time: DateTime<Utc>,
}

impl TraceEvent {
    /// Create a `started` event carrying the captured arguments.
    pub fn started(method: impl Into<String>, data: Vec<ParamCapture>) -> Self {
        Self {
            method: method.into(),
            status: TraceStatus::Started,
            data: Some(data),
            feature: None,
            error: None,
            time: Utc::now(),
        }
    }

    /// Create an `ok` event.
    pub fn ok(method: impl Into<String>, feature: Option<TraceFeature>) -> Self {
        Self {
            method: method.into(),
            status: TraceStatus::Ok,
            data: None,
            feature,
            error: None,
            time: Utc::now(),
        }
    }

    /// Create a `failed` event carrying the error payload.
    pub fn failed(method: impl Into<String>, error: Value) -> Self {
        Self {
            method: method.into(),
            status: TraceStatus::Failed,
            data: None,
            feature: None,
            error: Some(error),
            time: Utc::now(),
        }
    }

    /// Whether this event came from the asynchronous path.
    pub fn is_async(&self) -> bool {
        self.feature == Some(TraceFeature::Async)
    }

    /// Find the captured value for a parameter position.
    pub fn captured(&self, position: usize) -> Option<&Value> {
        self.data
            .as_ref()?
            .iter()
            .find(|capture| capture.param_position == position)
            .map(|capture| &capture.value)
    }

    /// Format as a single human-readable line.
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "{} {:<8} {}",
            iso_millis::format(&self.time),
            self.status,
            self.method
        );
        if self.is_async() {
            line.push_str(" [async]");
        }
        if let Some(data) = &self.data {
            for capture in data {
                line.push_str(&format!(" #{}={}", capture.param_position, capture.value));
            }
        }
        if let Some(error) = &self.error {
            match error {
                Value::String(message) => line.push_str(&format!(" error={message:?}")),
                other => line.push_str(&format!(" error={other}")),
            }
        }
        line
    }
}

// ============================================================================
// Call Options
// ============================================================================

/// Per-call options passed alongside the positional arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOptions {
    /// When true the caller asks not to be logged: `started` and `ok`
    /// events are suppressed for this call. `failed` events are always
    /// recorded.
    #[serde(default)]
    pub verbose: bool,
}

impl CallOptions {
    /// Options requesting suppression of normal trace events.
    pub fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Whether `started`/`ok` events are suppressed.
    pub fn suppresses_trace(&self) -> bool {
        self.verbose
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(time: &DateTime<Utc>) -> String {
        time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|time| time.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
