pub const ROUND_SECONDS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// Seconds left to show.
    Running(u32),
    Expired,
}

/// Whole-second round clock. The starting value is shown straight away, each
/// tick takes one second off, and reaching zero ends the round instead of
/// showing a zero.
#[derive(Clone, Debug)]
pub struct CountdownTimer {
    remaining: u32,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            remaining: ROUND_SECONDS,
        }
    }

    pub fn start(&mut self, seconds: u32) {
        self.remaining = seconds;
    }

    pub fn tick(&mut self) -> CountdownTick {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            CountdownTick::Expired
        } else {
            CountdownTick::Running(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
