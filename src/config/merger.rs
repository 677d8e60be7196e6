// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration merging.
//!
//! Handles merging configurations from different sources with proper precedence.

use super::types::{OutputFormat, ResolvedConfig, WorkspaceConfig};

/// CLI options that can override configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub log_level: Option<String>,
    pub log_filter: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub pretty_json: Option<bool>,
    pub ansi_colors: Option<bool>,
    pub show_metrics: Option<bool>,
}

/// Default configuration values.
pub fn default_config() -> ResolvedConfig {
    ResolvedConfig::default()
}

/// Merge multiple configurations with precedence.
///
/// Precedence (highest to lowest):
/// 1. CLI options
/// 2. Local config (.verbosity.local.json)
/// 3. Workspace config (.verbosity.json)
/// 4. Global config (~/.verbosity/config.json)
/// 5. Default values
pub fn merge_config(
    global: Option<WorkspaceConfig>,
    workspace: Option<WorkspaceConfig>,
    local: Option<WorkspaceConfig>,
    cli: CliOptions,
) -> ResolvedConfig {
    let mut result = default_config();

    for config in [global, workspace, local].into_iter().flatten() {
        apply_workspace_config(&mut result, &config);
    }

    apply_cli_options(&mut result, &cli);

    result
}

fn apply_workspace_config(result: &mut ResolvedConfig, config: &WorkspaceConfig) {
    if let Some(ref level) = config.log_level {
        result.log_level = level.clone();
    }

    if config.log_filter.is_some() {
        result.log_filter = config.log_filter.clone();
    }

    if let Some(format) = config.output_format {
        result.output_format = format;
    }

    if let Some(pretty) = config.pretty_json {
        result.pretty_json = pretty;
    }

    if let Some(ansi) = config.ansi_colors {
        result.ansi_colors = ansi;
    }

    if let Some(show) = config.show_metrics {
        result.show_metrics = show;
    }
}

fn apply_cli_options(result: &mut ResolvedConfig, cli: &CliOptions) {
    if let Some(ref level) = cli.log_level {
        result.log_level = level.clone();
    }

    if cli.log_filter.is_some() {
        result.log_filter = cli.log_filter.clone();
    }

    if let Some(format) = cli.output_format {
        result.output_format = format;
    }

    if let Some(pretty) = cli.pretty_json {
        result.pretty_json = pretty;
    }

    if let Some(ansi) = cli.ansi_colors {
        result.ansi_colors = ansi;
    }

    if let Some(show) = cli.show_metrics {
        result.show_metrics = show;
    }
}
