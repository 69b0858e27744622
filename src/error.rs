use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by configuration and session construction.
///
/// Playback controls never fail; only building a session from bad input
/// or touching the config file can.
#[derive(Debug, Error)]
pub enum Error {
    #[error("typing speed must be greater than zero milliseconds per character")]
    InvalidSpeed,

    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
