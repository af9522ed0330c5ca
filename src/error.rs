use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("tick_rate_ms must be at least 1")]
    ZeroTickRate,
}

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("stdout is not a terminal, bell has nowhere to ring")]
    NotATerminal,
}
