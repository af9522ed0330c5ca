pub mod balloon_pop;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

pub trait Game {
    /// Advances game time by `elapsed_ms` of wall-clock time.
    fn update(&mut self, elapsed_ms: u64);
    fn handle_input(&mut self, key: KeyEvent);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn is_game_over(&self) -> bool;
}
