use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::error::BroadcastError;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_INTERVAL_MS: u64 = 1000;

/// CLI surface for the broadcaster binary.
#[derive(Debug, Parser)]
#[command(
    name = "gdl90-broadcast",
    version,
    about = "Serve GDL 90 heartbeat and traffic report frames over TCP"
)]
pub struct Options {
    /// Address to accept GDL 90 client connections on.
    #[arg(short, long, default_value = None)]
    pub listen: Option<String>,

    /// Heartbeat/traffic tick period, in milliseconds.
    #[arg(long, default_value = None)]
    pub interval_ms: Option<u64>,

    /// Emit frames with each byte's bit order reversed (the convention
    /// most serial GDL 90 receivers, including ForeFlight, expect).
    #[arg(long, default_value = None)]
    pub lsb: Option<bool>,

    /// Optional TOML file overlaying these defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity; repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Mirrors [`Options`] with every field optional, deserialized from a
/// TOML file and merged under whatever the CLI specified explicitly.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    listen: Option<String>,
    interval_ms: Option<u64>,
    lsb: Option<bool>,
}

/// Fully resolved settings the server loop actually runs with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub listen: SocketAddr,
    pub interval_ms: u64,
    pub lsb: bool,
}

impl Settings {
    pub fn resolve(options: Options) -> Result<Self, BroadcastError> {
        let file_config = match &options.config {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|source| BroadcastError::ConfigRead {
                    path: path.display().to_string(),
                    source,
                })?;
                toml::from_str(&contents).map_err(|source| BroadcastError::ConfigParse {
                    path: path.display().to_string(),
                    source,
                })?
            }
            None => FileConfig::default(),
        };

        let listen = options
            .listen
            .or(file_config.listen)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen = listen
            .parse()
            .map_err(|_| BroadcastError::InvalidListenAddress(listen.clone()))?;

        Ok(Settings {
            listen,
            interval_ms: options.interval_ms.or(file_config.interval_ms).unwrap_or(DEFAULT_INTERVAL_MS),
            lsb: options.lsb.or(file_config.lsb).unwrap_or(true),
        })
    }
}
