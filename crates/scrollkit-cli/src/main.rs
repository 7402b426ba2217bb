use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scrollkit_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "scrollkit")]
#[command(author, version, about = "Scroll-driven navbar and back-to-top visibility")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of ~/.config/scrollkit/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a text document in the terminal viewer
    View {
        /// Document to open (`# headings` and `![alt](path)` images are recognised)
        file: PathBuf,
    },
    /// Feed scroll offsets through the visibility controller
    Replay {
        /// Offsets in pixels; read from stdin when omitted
        offsets: Vec<u32>,
        /// Print one JSON object per offset
        #[arg(long)]
        json: bool,
        /// Simulated time between offsets, in milliseconds
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
        /// Throttle scroll handling to once per this many milliseconds
        #[arg(long)]
        throttle_ms: Option<u64>,
    },
    /// Print the effective configuration
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,
        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    // The viewer owns the terminal, so its logs go to a file
    init_logging(&config, matches!(cli.command, Commands::View { .. }))?;

    match cli.command {
        Commands::View { file } => commands::view::run(config, &file).await,
        Commands::Replay {
            offsets,
            json,
            interval_ms,
            throttle_ms,
        } => {
            let options = commands::replay::ReplayOptions {
                json,
                interval_ms,
                throttle_ms,
            };
            commands::replay::run(&config, offsets, &options)
        }
        Commands::Config { init, force } => {
            let path = cli.config.unwrap_or_else(AppConfig::config_path);
            commands::config::run(&config, &path, init, force)
        }
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
