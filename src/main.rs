use aether_bar::config::AppConfig;
use aether_bar::core::{BarContext, Dispatcher};
use aether_bar::render::NodeTree;
use aether_bar::transport::{run_event_loop, spawn_clock_ticker, TcpTransport, TransportMode};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::unbounded_channel;

/// aether-bar - A live desktop status bar fed by a metrics collector
#[derive(Parser, Debug, Clone)]
#[command(name = "aether-bar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Collector address, overriding the config file (e.g., 127.0.0.1:3001)
    #[arg(long = "connect", value_name = "ADDR")]
    connect: Option<String>,

    /// Let the collector push updates instead of requesting them
    #[arg(long = "push")]
    push: bool,

    /// Delay in milliseconds between an update and the next request
    #[arg(long = "interval", value_name = "MS")]
    interval: Option<u64>,

    /// Output format written to stdout on every change
    #[arg(long = "output", value_enum, default_value = "text")]
    output: OutputFormat,

    /// Write the default configuration to the config file and exit
    #[arg(long = "init-config")]
    init_config: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// One line of text with glyphs
    Text,
    /// JSON object of region markup
    Markup,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn, 1: info, 2: debug, 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting aether-bar v{}", env!("CARGO_PKG_VERSION"));

    if cli.init_config {
        if let Err(e) = init_config(cli.config.as_deref()) {
            error!("{:#}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Write the default configuration, refusing to replace an existing file
fn init_config(path: Option<&Path>) -> Result<()> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_path()?,
    };
    if target.exists() {
        anyhow::bail!("Config file {} already exists", target.display());
    }

    let config = AppConfig::default();
    match path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    println!("Wrote default configuration to {}", target.display());
    Ok(())
}

/// Load the configuration and apply command line overrides
fn load_config(cli: &Cli) -> Result<(AppConfig, Option<PathBuf>)> {
    let (mut config, path) = match &cli.config {
        Some(path) => (AppConfig::load_from_path(path)?, Some(path.clone())),
        None => (AppConfig::load()?, AppConfig::config_path().ok()),
    };

    if let Some(address) = &cli.connect {
        config.transport.address = address.clone();
    }
    if cli.push {
        config.transport.mode = TransportMode::Push;
    }
    if let Some(interval) = cli.interval {
        config.transport.request_interval_ms = interval;
    }
    Ok((config, path))
}

fn run(cli: Cli) -> Result<()> {
    let (config, config_path) = load_config(&cli)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run_bar(cli.output, config, config_path))
}

async fn run_bar(
    output: OutputFormat,
    config: AppConfig,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (local_tx, local_rx) = unbounded_channel();
    let _ticker = spawn_clock_ticker(local_tx.clone());

    #[cfg(feature = "watch")]
    let _watcher = match config_path.as_ref().filter(|path| path.exists()) {
        Some(path) => match aether_bar::config::watch_config(path.clone(), local_tx.clone()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("Config hot-reload disabled: {:#}", e);
                None
            }
        },
        None => None,
    };
    #[cfg(not(feature = "watch"))]
    let _ = &config_path;
    drop(local_tx);

    let context = BarContext::new(config.theme.clone(), config.metric_keys.clone())
        .with_envelope(config.transport.envelope.clone());
    let mut dispatcher = Dispatcher::new(NodeTree::with_regions(), context);

    let mut transport = TcpTransport::connect(&config.transport.address, config.transport.mode)
        .await
        .with_context(|| format!("Failed to connect to {}", config.transport.address))?;

    let glyphs = config.glyphs.clone();
    let mut last_line = String::new();
    run_event_loop(
        &mut transport,
        &mut dispatcher,
        config.layout(),
        local_rx,
        config.transport.request_interval(),
        |d| {
            let line = match output {
                OutputFormat::Text => d.target().render_text(&glyphs),
                OutputFormat::Markup => {
                    serde_json::to_string(&d.target().render_markup()).unwrap_or_default()
                }
            };
            if line != last_line {
                println!("{}", line);
                last_line = line;
            }
        },
    )
    .await
}
