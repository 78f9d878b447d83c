//! FaceTrigger CLI: replay and inspect blend-shape streams.
//!
//! Usage:
//!   facetrigger replay <FRAMES>     Run the detectors over a recorded stream
//!   facetrigger validate <FRAMES>   Check a stream for malformed data
//!   facetrigger info <FRAMES>       Show stream information
//!   facetrigger config show|init    Inspect or create the config file
//!   facetrigger synth <OUT>         Write a synthetic stream

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use facetrigger_common::config::{config_file_path, AppConfig, LoggingConfig};
use facetrigger_common::FaceTriggerError;

mod commands;

#[derive(Parser)]
#[command(
    name = "facetrigger",
    about = "Turn facial blend-shape streams into edge-triggered expression events",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the detector engine over a recorded frame stream
    Replay {
        /// Path to the JSONL frame stream
        path: PathBuf,

        #[command(flatten)]
        thresholds: commands::replay::ThresholdArgs,

        /// Paired detector policy: prioritized|independent
        #[arg(long)]
        policy: Option<String>,

        /// Print one JSON object per event
        #[arg(long)]
        json: bool,
    },

    /// Validate a frame stream
    Validate {
        /// Path to the JSONL frame stream
        path: PathBuf,
    },

    /// Show frame stream information
    Info {
        /// Path to the JSONL frame stream
        path: PathBuf,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Write a synthetic frame stream for a scripted expression
    Synth {
        /// Output file
        output: PathBuf,

        /// Expression pattern: blink|wink-left|wink-right|smile
        #[arg(long, default_value = "blink")]
        pattern: String,

        /// Frame rate (Hz)
        #[arg(long, default_value = "60")]
        rate: u32,

        /// Stream length (seconds)
        #[arg(long, default_value = "3.0")]
        duration_secs: f64,

        /// Length of one expression cycle (seconds)
        #[arg(long, default_value = "1.0")]
        period_secs: f64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration
    Init {
        /// Destination (defaults to the standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Resolve the effective config. An explicit `--config` must load; the
/// standard file falls back to defaults, returning the reason it was ignored
/// so it can be logged once a subscriber is installed.
fn load_config(path: Option<&Path>) -> anyhow::Result<(AppConfig, Option<FaceTriggerError>)> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .map(|config| (config, None))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
        None => Ok(AppConfig::load_or_default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, ignored) = load_config(cli.config.as_deref())?;

    // Initialize logging
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    facetrigger_common::logging::init_logging(&LoggingConfig {
        level,
        ..config.logging.clone()
    });

    if let Some(e) = ignored {
        tracing::warn!(
            "Ignoring config at {}: {e}; using defaults",
            config_file_path().display()
        );
    }

    match cli.command {
        Commands::Replay {
            path,
            thresholds,
            policy,
            json,
        } => commands::replay::run(path, config, thresholds, policy, json),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Info { path } => commands::info::run(path),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { output, force } => commands::config::init(output, force),
        },
        Commands::Synth {
            output,
            pattern,
            rate,
            duration_secs,
            period_secs,
        } => commands::synth::run(output, pattern, rate, duration_secs, period_secs),
    }
}
