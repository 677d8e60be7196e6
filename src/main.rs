// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Verbosity demo entry point.
//!
//! Issues three queries against a fake reader and prints the accumulated
//! trace log.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use verbosity::config::{self, CliOptions, OutputFormat, ResolvedConfig};
use verbosity::reader::{DataPackageQuery, FakeDdfCsvReader};
use verbosity::telemetry::{init_telemetry, TelemetryConfig, GLOBAL_METRICS};
use verbosity::{CallOptions, ReaderError, TraceLog};

/// Verbosity - traced calls against a fake data reader.
#[derive(Parser)]
#[command(name = "verbosity")]
#[command(author, version, about = "Traced calls against a fake data reader", long_about = None)]
struct Cli {
    /// Trace log output format
    #[arg(short = 'f', long, value_enum)]
    format: Option<Format>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Print call metrics after the trace log
    #[arg(short, long)]
    metrics: bool,

    /// Show debug output
    #[arg(long)]
    debug: bool,

    /// Show trace output (span enter/exit)
    #[arg(long)]
    trace: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Directory to search for configuration
    #[arg(short = 'C', long, env = "VERBOSITY_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Trace log output format.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Text => OutputFormat::Text,
        }
    }
}

/// Subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the demo queries (default)
    Run,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Initialize a new configuration file
    Init,

    /// Show version information
    Version,
}

/// Config subcommand actions.
#[derive(Subcommand)]
enum ConfigAction {
    /// Show resolved configuration
    Show,
}

impl Cli {
    fn cli_options(&self) -> CliOptions {
        let log_level = if self.trace {
            Some("trace".to_string())
        } else if self.debug {
            Some("debug".to_string())
        } else {
            None
        };

        CliOptions {
            log_level,
            log_filter: None,
            output_format: self.format.map(OutputFormat::from),
            pretty_json: self.compact.then_some(false),
            ansi_colors: self.no_color.then_some(false),
            show_metrics: self.metrics.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let workspace_root = config::find_workspace_root(&cwd).unwrap_or_else(|| cwd.clone());
    let resolved = config::load_config(&workspace_root, cli.cli_options())?;

    let telemetry = TelemetryConfig::try_from(&resolved)?.with_span_events(cli.trace);
    let _guard = init_telemetry(&telemetry)?;
    colored::control::set_override(resolved.ansi_colors);

    tracing::debug!(root = %workspace_root.display(), "Configuration loaded");

    match cli.command {
        None | Some(Commands::Run) => run_demo(&resolved).await,
        Some(Commands::Config { action }) => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
                Ok(())
            }
        },
        Some(Commands::Init) => {
            let path = config::init_config(&cwd, None)?;
            println!("{} {}", "Created".green(), path.display());
            Ok(())
        }
        Some(Commands::Version) => {
            println!("verbosity {}", verbosity::VERSION);
            Ok(())
        }
    }
}

async fn run_demo(config: &ResolvedConfig) -> anyhow::Result<()> {
    let reader = FakeDdfCsvReader::new(false)?;

    if let Err(err) = run_queries(&reader).await {
        println!("{} {}", "error: ".red(), err);
    }

    println!(
        "{} {}",
        "verbosity data: ".bold(),
        render_trace_log(reader.trace_log(), config)?
    );

    if config.show_metrics {
        println!("\n{}", GLOBAL_METRICS.snapshot().format_report());
    }

    Ok(())
}

/// The three demo queries; the first failure stops the rest.
async fn run_queries(reader: &FakeDdfCsvReader) -> Result<(), ReaderError> {
    let result = reader
        .query(DataPackageQuery::select("concepts"), false, CallOptions::default())
        .await?;
    println!("{} {}", "result is: ".cyan(), result);

    let result = reader
        .query(DataPackageQuery::select("concepts"), false, CallOptions::verbose())
        .await?;
    println!("{} {}", "result is: ".cyan(), result);

    let result = reader
        .query(DataPackageQuery::select("fake-concepts"), true, CallOptions::default())
        .await?;
    println!("{} {}", "result is: ".cyan(), result);

    Ok(())
}

fn render_trace_log(log: &TraceLog, config: &ResolvedConfig) -> anyhow::Result<String> {
    let rendered = match config.output_format {
        OutputFormat::Json if config.pretty_json => log.to_json_pretty()?,
        OutputFormat::Json => log.to_json()?,
        OutputFormat::Text => {
            let lines: Vec<String> = log
                .snapshot()
                .iter()
                .map(|event| event.format_line())
                .collect();
            format!("\n{}", lines.join("\n"))
        }
    };
    Ok(rendered)
}
