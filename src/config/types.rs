// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.
//!
//! Defines the structure of workspace and resolved configuration,
//! supporting JSON and YAML formats.

use serde::{Deserialize, Serialize};

/// How the trace log is rendered by the demo binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of events.
    #[default]
    Json,
    /// One line per event.
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Workspace configuration.
/// Can be defined in .verbosity.json or .verbosity/config.json in the project root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Filter directive, e.g. `verbosity::instrument=debug`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,

    /// Trace log output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_json: Option<bool>,

    /// Use ANSI colors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansi_colors: Option<bool>,

    /// Print call metrics after the trace log
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_metrics: Option<bool>,
}

/// Fully resolved configuration with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub log_level: String,
    pub log_filter: Option<String>,
    pub output_format: OutputFormat,
    pub pretty_json: bool,
    pub ansi_colors: bool,
    pub show_metrics: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_filter: None,
            output_format: OutputFormat::Json,
            pretty_json: true,
            ansi_colors: true,
            show_metrics: false,
        }
    }
}
