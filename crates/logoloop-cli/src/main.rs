use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use logoloop_core::{marquee::Simulation, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "logoloop")]
#[command(author, version, about = "An infinite logo marquee for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: ~/.config/logoloop/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the marquee
    Run,
    /// Drive the engine with synthetic frames and print samples
    Simulate {
        /// Length of the run in seconds
        #[arg(long, default_value_t = 5.0)]
        seconds: f64,
        /// Frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Pointer enters the container at this time
        #[arg(long)]
        hover_at: Option<f64>,
        /// Pointer leaves the container at this time
        #[arg(long)]
        leave_at: Option<f64>,
        /// Width of one copy of the content
        #[arg(long, default_value_t = 1000.0)]
        sequence_width: f64,
        /// Width of the container
        #[arg(long, default_value_t = 1200.0)]
        container_width: f64,
        /// Seconds between printed samples
        #[arg(long, default_value_t = 1.0)]
        every: f64,
        /// Print JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the copy count for a container and sequence width
    Layout {
        #[arg(long)]
        container_width: f64,
        #[arg(long)]
        sequence_width: f64,
    },
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);

    // Writing the defaults must work even when the current file is broken
    if let Some(Commands::InitConfig { force }) = cli.command {
        init_logging(&AppConfig::default(), false)?;
        return commands::init_config::run(&config_path, force);
    }

    // Load configuration
    let config = Arc::new(AppConfig::load_from(&config_path)?);

    // The full-screen marquee owns the terminal, so it logs to a file
    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Simulate {
            seconds,
            fps,
            hover_at,
            leave_at,
            sequence_width,
            container_width,
            every,
            json,
        }) => {
            let sim = Simulation {
                seconds,
                fps,
                container_width,
                sequence_width,
                hover_at,
                leave_at,
                sample_every: every,
            };
            commands::simulate::run(&config, &sim, json)
        }
        Some(Commands::Layout {
            container_width,
            sequence_width,
        }) => commands::layout::run(&config, container_width, sequence_width),
        Some(Commands::InitConfig { .. }) => Ok(()),
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides `general.log_level`
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
