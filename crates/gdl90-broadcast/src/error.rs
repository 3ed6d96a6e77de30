use thiserror::Error;

/// Everything that can go wrong running the broadcaster binary, distinct
/// from [`gdl90::GdlError`] which covers only wire-level codec failures.
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("{0:?} is not a valid listen address")]
    InvalidListenAddress(String),

    #[error("codec error: {0}")]
    Codec(#[from] gdl90::GdlError),
}
