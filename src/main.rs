//! Contact service
//!
//! Back end of a portfolio site's contact form, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────────┐
//!                         │                   CONTACT SERVICE                     │
//!                         │                                                       │
//!   POST /api/contact     │  ┌─────────┐   ┌────────────┐   ┌───────────┐         │
//!   ──────────────────────┼─▶│  http   │──▶│  security  │──▶│  contact  │         │
//!                         │  │ server  │   │ rate limit │   │ validator │         │
//!                         │  └─────────┘   └────────────┘   └─────┬─────┘         │
//!                         │                                       │               │
//!                         │                                       ▼               │
//!   JSON response         │  ┌──────────┐                 ┌──────────────┐        │
//!   ◀─────────────────────┼──│ response │◀────────────────│ persistence  │◀───────┼── Row store
//!                         │  └──────────┘                 │ rest | null  │        │
//!                         │                               └──────────────┘        │
//!                         │  ┌─────────────────────────────────────────────────┐  │
//!                         │  │ config │ observability │ lifecycle (shutdown)    │  │
//!                         │  └─────────────────────────────────────────────────┘  │
//!                         └──────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use contact_service::config::load_config;
use contact_service::lifecycle::startup;
use contact_service::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "contact-service")]
#[command(about = "Contact form submission service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CONTACT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!("contact-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit = config.rate_limit.limit,
        rate_window_secs = config.rate_limit.window_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
