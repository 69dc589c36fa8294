//! textvis - Entry Point

use clap::Parser;
use std::path::PathBuf;
use textvis::config::{self, CliOverrides};
use textvis::model::AppError;
use textvis::source::ValueMode;
use textvis::view::{run_with_source, ViewOptions};
use tracing::info;

/// Terminal visualizer for high-frequency value streams
#[derive(Parser, Debug)]
#[command(name = "textvis")]
#[command(version)]
#[command(about = "Displays a rolling window of values from a file or stdin")]
pub struct Args {
    /// Path to an input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Sanitize policy for display text
    #[arg(long, value_parser = ["collapse", "escape", "glyph"])]
    pub policy: Option<String>,

    /// Route every value through the immediate path instead of batching
    #[arg(short, long)]
    pub immediate: bool,

    /// Parse input lines as JSON values
    #[arg(long)]
    pub json: bool,

    /// Path to the log file for tracing output
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Resolve configuration through the full precedence chain:
    // defaults → config file → env vars → CLI args.
    let config = {
        let file = config::load_config_file(args.config.clone())?;
        let merged = config::merge_config(file)?;
        let with_env = config::apply_env_overrides(merged)?;
        config::apply_cli_overrides(
            with_env,
            CliOverrides {
                policy: args.policy.clone(),
                immediate: args.immediate.then_some(true),
                json: args.json.then_some(true),
                log_file: args.log_file.clone(),
            },
        )?
    };

    textvis::logging::init(&config.log_file_path)?;
    info!(config = ?config, "configuration resolved");

    let source = textvis::source::detect_source(args.file.clone())?;

    let options = ViewOptions {
        policy: config.policy,
        immediate: config.immediate,
        mode: if config.json {
            ValueMode::Json
        } else {
            ValueMode::Text
        },
    };

    run_with_source(source, options)?;
    Ok(())
}
