use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::sound::SoundMode;

const APP_DIR: &str = "balloon-pop";

#[derive(Debug, Parser)]
#[command(name = "balloon-pop", version, about = "Pop the balloon by typing its letter")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Milliseconds between idle frames
    #[arg(long)]
    pub tick_rate_ms: Option<u64>,
    /// Disable the correct-key bell
    #[arg(long)]
    pub mute: bool,
    /// Write logs here instead of the default location
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Seed for a reproducible letter and velocity sequence
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub sound: SoundMode,
    pub log_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16, // ~60 FPS
            sound: SoundMode::Bell,
            log_file: None,
            seed: None,
        }
    }
}

impl Config {
    /// Loads `path`, or the default location when `path` is `None`. A missing
    /// file at the default location yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config: Config =
            toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(ms) = cli.tick_rate_ms {
            self.tick_rate_ms = ms;
        }
        if cli.mute {
            self.sound = SoundMode::Off;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = Some(path.clone());
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        self.validate()
    }

    /// Configured log file, else `<data_local_dir>/balloon-pop/balloon-pop.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join(APP_DIR).join("balloon-pop.log")))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let file = write_config("tick_rate_ms = 30\nsound = \"off\"\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.tick_rate_ms, 30);
        assert_eq!(config.sound, SoundMode::Off);
        assert_eq!(config.log_file, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("tick_rate_ms = \"soon\"");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("difficulty = 11");
        assert!(Config::load(Some(file.path())).is_err());
        // The round is always 60 seconds
        let file = write_config("round_seconds = 30");
        assert!(matches!(
            Config::load(Some(file.path())).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let file = write_config("tick_rate_ms = 0");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTickRate));
    }

    #[test]
    fn cli_flags_override_the_file() {
        let mut config = Config::default();
        let cli = Cli::parse_from([
            "balloon-pop",
            "--mute",
            "--seed",
            "42",
            "--tick-rate-ms",
            "10",
        ]);
        config.apply_cli(&cli).unwrap();
        assert_eq!(config.sound, SoundMode::Off);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_rate_ms, 10);

        let cli = Cli::parse_from(["balloon-pop", "--tick-rate-ms", "0"]);
        assert!(config.apply_cli(&cli).is_err());
    }

    #[test]
    fn explicit_log_file_wins() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/pop.log")),
            ..Config::default()
        };
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/pop.log")));
    }
}
