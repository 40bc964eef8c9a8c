use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flexscroll_core::{AppConfig, Axis};

mod commands;

#[derive(Parser)]
#[command(name = "flexscroll")]
#[command(author, version, about = "Bidirectional infinite scroll playground")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/flexscroll/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the terminal demo
    Demo {
        /// Scroll horizontally regardless of the configured axis
        #[arg(long)]
        horizontal: bool,
    },
    /// Replay a scenario file and print the state after every step
    Simulate {
        /// Scenario TOML file
        file: PathBuf,
        /// Print one JSON object per step
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config {
        /// Also write it to the configuration path
        #[arg(long)]
        write: bool,
    },
}

/// Install the tracing subscriber
///
/// The demo owns the terminal, so it logs to a file under the data
/// directory instead of stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let command = cli.command.unwrap_or(Commands::Demo { horizontal: false });
    init_logging(&config, matches!(command, Commands::Demo { .. }))?;

    match command {
        Commands::Demo { horizontal } => {
            if horizontal {
                config.scroll.axis = Axis::Horizontal;
            }
            commands::demo::run(config).await
        }
        Commands::Simulate { file, json } => commands::simulate::run(&file, json).await,
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
