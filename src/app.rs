use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::games::balloon_pop::BalloonPop;
use crate::games::Game;

pub struct App {
    pub should_quit: bool,
    pub game: BalloonPop,
    last_tick: Instant,
}

impl App {
    pub fn new(game: BalloonPop) -> Self {
        Self::starting_at(game, Instant::now())
    }

    pub fn starting_at(game: BalloonPop, now: Instant) -> Self {
        Self {
            should_quit: false,
            game,
            last_tick: now,
        }
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    /// Feeds whole elapsed milliseconds to the game. The fractional
    /// remainder stays on the books for the next tick.
    pub fn on_tick_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let ms = elapsed.as_millis() as u64;
        if ms == 0 {
            return;
        }
        self.last_tick += Duration::from_millis(ms);
        self.game.update(ms);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            // During play q is a target letter
            KeyCode::Char('q') | KeyCode::Char('Q') if self.game.is_game_over() => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        self.game.handle_input(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::balloon_pop::GameState;
    use crate::sound::Silent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app(now: Instant) -> App {
        let game = BalloonPop::new(StdRng::seed_from_u64(5), Box::new(Silent));
        App::starting_at(game, now)
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_and_esc_quit() {
        let mut a = app(Instant::now());
        a.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(a.should_quit);

        let mut a = app(Instant::now());
        a.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(a.should_quit);
    }

    #[test]
    fn q_is_game_input_until_the_round_ends() {
        let mut a = app(Instant::now());
        a.on_key(press('q'));
        assert!(!a.should_quit);

        a.game.on_timer_expired();
        a.on_key(press('q'));
        assert!(a.should_quit);
    }

    #[test]
    fn ticks_accumulate_sub_millisecond_remainders() {
        let t0 = Instant::now();
        let mut a = app(t0);
        let start = a.game.balloon().unwrap().bbox;
        // 200 ticks of 0.5 ms each make exactly 100 ms: one balloon step
        for i in 1..=200u64 {
            a.on_tick_at(t0 + Duration::from_micros(500 * i));
        }
        assert_ne!(a.game.balloon().unwrap().bbox, start);
    }

    #[test]
    fn a_full_minute_of_ticks_ends_the_round() {
        let t0 = Instant::now();
        let mut a = app(t0);
        for i in 1..=3750u64 {
            a.on_tick_at(t0 + Duration::from_millis(16 * i));
        }
        assert_eq!(a.game.state(), GameState::GameOver);
        a.on_key(press('r'));
        assert_eq!(a.game.state(), GameState::Playing);
        assert_eq!(a.game.remaining_seconds(), 60);
    }
}
