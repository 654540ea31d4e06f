use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sports_widgets::attributes::{parse_pair, AttributeSet};
use sports_widgets::background;
use sports_widgets::config;
use sports_widgets::data_provider::{ApiClient, SportsDataProvider, VisibilityFlag};
use sports_widgets::widget::Widget;

// Channel Constants
/// Buffer size for the shutdown channel
const SHUTDOWN_CHANNEL_BUFFER_SIZE: usize = 1;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "sports-widgets")]
#[command(about = "Render declarative sports widgets as HTML")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one widget
    Render {
        /// Widget attribute as key=value (repeatable), e.g. --attr type=standings
        #[arg(short, long = "attr", value_parser = parse_pair)]
        attrs: Vec<(String, String)>,

        /// Keep refreshing on the widget's refresh interval until Ctrl-C
        #[arg(short, long)]
        watch: bool,

        /// Serve fixture data instead of calling the API
        #[cfg(feature = "development")]
        #[arg(long)]
        mock: bool,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("visible: {}", cfg.visible);
    match &cfg.shared_translations {
        Some(path) => println!("shared_translations: {}", path.display()),
        None => println!("shared_translations: (none)"),
    }
    println!();
    println!("[shared]");
    for (key, value) in cfg.shared.iter() {
        println!("{} = {:?}", key, value);
    }
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

fn create_provider(use_mock: bool) -> anyhow::Result<Arc<dyn SportsDataProvider>> {
    #[cfg(feature = "development")]
    if use_mock {
        return Ok(Arc::new(sports_widgets::dev::mock_client::MockClient::new()));
    }
    #[cfg(not(feature = "development"))]
    let _ = use_mock;

    let client = ApiClient::new().context("Failed to create API client")?;
    Ok(Arc::new(client))
}

fn print_widget(widget: &mut Widget) {
    println!("{}", widget.render_html());
    for event in widget.take_events() {
        eprintln!("{}", event.to_json());
    }
}

/// Connect one widget, print it, and optionally keep refreshing it
async fn run_render(
    config: &config::Config,
    attrs: Vec<(String, String)>,
    watch: bool,
    use_mock: bool,
) -> anyhow::Result<()> {
    let shared = config.shared_config()?;
    let provider = create_provider(use_mock)?;
    let visibility = VisibilityFlag::new(config.visible);

    let mut widget = Widget::connect(
        AttributeSet::from_pairs(attrs),
        Some(&shared),
        provider,
        visibility,
    )
    .await;
    print_widget(&mut widget);

    if !watch {
        return Ok(());
    }

    let interval = widget.config().options.refresh_interval();
    if interval.is_zero() {
        eprintln!("Widget has no refresh interval; set --attr refresh=<seconds>");
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(SHUTDOWN_CHANNEL_BUFFER_SIZE);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(()).await;
        }
    });

    background::refresh_loop(widget, interval, shutdown_rx, print_widget).await;
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    let result = match cli.command {
        Commands::Config => {
            handle_config_command();
            Ok(())
        }
        #[cfg(feature = "development")]
        Commands::Render { attrs, watch, mock } => run_render(&config, attrs, watch, mock).await,
        #[cfg(not(feature = "development"))]
        Commands::Render { attrs, watch } => run_render(&config, attrs, watch, false).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
