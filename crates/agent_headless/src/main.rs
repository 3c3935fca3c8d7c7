//! Headless skirmish agent.
//!
//! Replays game snapshots through the tick policy, reading JSON lines on
//! stdin (or a file) and writing the issued commands as JSON lines on stdout.
//!
//! # Usage
//!
//! ```bash
//! # Read messages from stdin
//! cargo run -p agent_headless
//!
//! # Replay a recorded session with a custom config and seed
//! cargo run -p agent_headless -- run --input session.jsonl --config policy.ron --seed 7
//!
//! # Print the default policy config
//! cargo run -p agent_headless -- config > policy.ron
//! ```
//!
//! # Protocol
//!
//! Input: JSON messages, one per line
//! Output (stdout): JSON responses, one per line
//! Logs (stderr): Debug information
//!
//! See the protocol module for message/response format.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use agent_core::config::PolicyConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use agent_headless::runner::{HeadlessConfig, HeadlessRunner};

#[derive(Parser)]
#[command(name = "agent_headless")]
#[command(about = "Headless skirmish agent driven by JSON snapshots")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent over a message stream
    Run {
        /// Read messages from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Policy config file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the config's random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the default policy config as RON
    Config,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for protocol)
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    match cli.command {
        Some(Commands::Run {
            input,
            config,
            seed,
        }) => cmd_run(input, config, seed),
        Some(Commands::Config) => cmd_config(),
        None => cmd_run(None, None, None),
    }
}

/// Run the agent until quit or end of input
fn cmd_run(input: Option<PathBuf>, config: Option<PathBuf>, seed: Option<u64>) {
    let mut policy = match config {
        Some(path) => PolicyConfig::load(&path).unwrap_or_else(|e| {
            eprintln!("FATAL: Failed to load config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => PolicyConfig::default(),
    };
    if let Some(seed) = seed {
        policy = policy.with_seed(seed);
    }
    tracing::info!(seed = policy.seed, "Starting agent session");

    let mut runner = HeadlessRunner::with_config(HeadlessConfig { policy });
    let stdout = io::stdout();
    let result = match input {
        Some(path) => match File::open(&path) {
            Ok(file) => runner.run(BufReader::new(file), stdout.lock()),
            Err(e) => {
                eprintln!("FATAL: Failed to open {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => runner.run(io::stdin().lock(), stdout.lock()),
    };

    match result {
        Ok(summary) => tracing::info!(
            ticks = summary.ticks,
            errors = summary.errors,
            shots = summary.shots,
            "Session complete"
        ),
        Err(e) => {
            eprintln!("FATAL: I/O error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the default config
fn cmd_config() {
    match PolicyConfig::default().to_ron_string() {
        Ok(ron) => println!("{ron}"),
        Err(e) => {
            eprintln!("FATAL: Failed to serialize config: {}", e);
            std::process::exit(1);
        }
    }
}
