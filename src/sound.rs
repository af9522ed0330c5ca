use std::io::{self, IsTerminal, Write};

use serde::Deserialize;

use crate::error::SoundError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundMode {
    #[default]
    Bell,
    Off,
}

/// Feedback played on a correct key. Playing never fails the game.
pub trait CorrectSound {
    fn play_correct(&mut self);
}

/// Rings the terminal bell.
pub struct TerminalBell {
    out: io::Stdout,
}

impl TerminalBell {
    pub fn open() -> Result<Self, SoundError> {
        let out = io::stdout();
        if !out.is_terminal() {
            return Err(SoundError::NotATerminal);
        }
        Ok(Self { out })
    }
}

impl CorrectSound for TerminalBell {
    fn play_correct(&mut self) {
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "Bell write failed");
        }
    }
}

pub struct Silent;

impl CorrectSound for Silent {
    fn play_correct(&mut self) {
        tracing::debug!("Sound not loaded, skipping correct-key sound");
    }
}

/// Resolves the configured mode to a player, degrading to [`Silent`] when the
/// output is unavailable.
pub fn load(mode: SoundMode) -> Box<dyn CorrectSound> {
    match mode {
        SoundMode::Off => Box::new(Silent),
        SoundMode::Bell => match TerminalBell::open() {
            Ok(bell) => Box::new(bell),
            Err(e) => {
                tracing::warn!(error = %e, "Sound unavailable, continuing without it");
                Box::new(Silent)
            }
        },
    }
}
