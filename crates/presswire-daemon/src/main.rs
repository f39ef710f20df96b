//! Presswire daemon - main entry point
//!
//! Captures ARP announcements from watched wireless buttons and fires the
//! configured HTTP callback for each press.

mod config;
mod dispatch;
mod run;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "presswire")]
#[command(about = "Wireless button press to HTTP callback daemon")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "configuration.json")]
    config: PathBuf,

    /// Capture interface (overrides the configured nic)
    #[arg(short, long)]
    interface: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Validate the configuration, print the capture filter, and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Presswire v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = config::load_config(&args.config)?;

    // Override capture interface if specified
    if let Some(interface) = args.interface {
        config.nic = interface;
    }

    let buttons = config::watch_set(&config)?;

    if args.check {
        // Validate-only mode: resolve the watch set and show the filter
        let filter = presswire_capture::arp_source_filter(&buttons)?;
        println!("interface: {}", config.nic);
        println!("buttons:");
        for button in buttons.buttons() {
            println!("  - {} ({}) -> {}", button.label, button.mac, button.url);
        }
        println!("filter: {filter}");
        return Ok(());
    }

    run::run(&config.nic, buttons).await
}
