#![doc = include_str!("../readme.md")]

mod config;
mod error;
mod server;
mod source;

use std::sync::Arc;

use clap::Parser;
use config::{Options, Settings};
use error::BroadcastError;
use source::{DemoSource, TrafficSource};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), BroadcastError> {
    let options = Options::parse();
    init_tracing(options.verbose);

    let settings = Settings::resolve(options)?;
    tracing::debug!(?settings, "resolved settings");

    let source: Arc<dyn TrafficSource> = Arc::new(DemoSource);
    server::run(settings, source).await
}

/// Verbosity follows a `-v` repeat-count convention: 0 is
/// warnings and above, each extra `-v` drops the default level one notch.
fn init_tracing(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)))
        .init();
}
