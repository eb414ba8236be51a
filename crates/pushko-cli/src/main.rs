//! # Pushko CLI
//!
//! Command-line client for hosted push-messaging.
//!
//! ## Usage
//!
//! ```bash
//! # Trigger an event with the default profile
//! pushko trigger -c my-channel -e my-event -d '{"message":"hello"}'
//!
//! # Use a custom config file and profile
//! pushko --config /path/to/pushko.toml --profile staging channels
//!
//! # Sign a subscription
//! pushko auth private-orders 1234.5678
//!
//! # Configure through environment variables
//! PUSHKO_PROFILES__DEFAULT__APP_ID=1234 pushko channels
//! ```

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pushko=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    pushko::metrics::describe_metrics();

    commands::run(cli).await
}
