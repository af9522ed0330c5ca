pub mod balloon;
pub mod confetti;
pub mod countdown;
pub mod letters;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use ratatui::prelude::*;

use crate::games::Game;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::sound::CorrectSound;
use balloon::Balloon;
use confetti::{BurstStatus, ConfettiBurst};
use countdown::{CountdownTick, CountdownTimer, ROUND_SECONDS};
use letters::normalize_key;

pub const BALLOON_TICK_MS: u64 = 100;
pub const CONFETTI_TICK_MS: u64 = 50;
pub const COUNTDOWN_TICK_MS: u64 = 1000;

pub const TRY_AGAIN: &str = "Try again!";
pub const GAME_OVER_TITLE: &str = "Game Over!";
pub const RETRY_PROMPT: &str = "Press R to retry";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskKind {
    BalloonTick,
    ConfettiTick,
    CountdownTick,
}

/// Scheduled work, stamped with the round it belongs to.
#[derive(Clone, Copy, Debug)]
struct Task {
    kind: TaskKind,
    epoch: u64,
}

/// The thing currently on the canvas. A balloon and a burst never coexist.
enum Animation {
    Idle,
    Balloon(Balloon),
    Confetti(ConfettiBurst),
}

/// Round state machine. Owns the session (score, high score, state, clock) and
/// the single live animation, and is the only thing input and timers talk to.
pub struct BalloonPop {
    state: GameState,
    score: u32,
    high_score: u32,
    countdown: CountdownTimer,
    animation: Animation,
    message: String,
    epoch: u64,
    scheduler: Scheduler<Task>,
    animation_task: Option<TaskHandle>,
    countdown_task: Option<TaskHandle>,
    rng: StdRng,
    sound: Box<dyn CorrectSound>,
}

impl BalloonPop {
    /// Builds the game and starts the first round.
    pub fn new(rng: StdRng, sound: Box<dyn CorrectSound>) -> Self {
        let mut game = Self {
            state: GameState::Playing,
            score: 0,
            high_score: 0,
            countdown: CountdownTimer::new(),
            animation: Animation::Idle,
            message: String::new(),
            epoch: 0,
            scheduler: Scheduler::new(),
            animation_task: None,
            countdown_task: None,
            rng,
            sound,
        };
        game.start();
        game
    }

    /// Begins a fresh 60 second round. Valid from any state; the high score
    /// survives.
    pub fn start(&mut self) {
        self.epoch += 1;
        self.cancel_animation();
        if let Some(handle) = self.countdown_task.take() {
            self.scheduler.cancel(handle);
        }

        self.score = 0;
        self.state = GameState::Playing;
        self.countdown.start(ROUND_SECONDS);
        self.spawn_balloon();
        let countdown = self.schedule_repeating(COUNTDOWN_TICK_MS, TaskKind::CountdownTick);
        self.countdown_task = Some(countdown);

        tracing::info!(round = self.epoch, high_score = self.high_score, "Round started");
    }

    pub fn handle_key(&mut self, c: char) {
        match self.state {
            GameState::Playing => {
                let Some(key) = normalize_key(c) else { return };
                let Animation::Balloon(balloon) = &self.animation else { return };
                if key == balloon.letter {
                    self.score += 1;
                    tracing::debug!(letter = %key, score = self.score, "Balloon popped");
                    self.sound.play_correct();
                    self.pop_balloon();
                } else {
                    tracing::debug!(pressed = %key, wanted = %balloon.letter, "Wrong key");
                    self.message = TRY_AGAIN.to_string();
                }
            }
            GameState::GameOver => {
                if c.eq_ignore_ascii_case(&'r') {
                    self.start();
                }
            }
        }
    }

    pub fn on_timer_expired(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        self.state = GameState::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.cancel_animation();
        if let Some(handle) = self.countdown_task.take() {
            self.scheduler.cancel(handle);
        }
        self.message.clear();

        tracing::info!(score = self.score, high_score = self.high_score, "Game over");
    }

    /// Moves the clock forward and runs everything that fell due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.scheduler.advance(elapsed_ms);
        while let Some((handle, task)) = self.scheduler.pop_due() {
            self.dispatch(handle, task);
        }
    }

    fn dispatch(&mut self, handle: TaskHandle, task: Task) {
        let live = match task.kind {
            TaskKind::BalloonTick | TaskKind::ConfettiTick => self.animation_task,
            TaskKind::CountdownTick => self.countdown_task,
        };
        if task.epoch != self.epoch || live != Some(handle) || self.state != GameState::Playing {
            tracing::debug!(?task, "Dropping stale tick");
            self.scheduler.cancel(handle);
            return;
        }

        match task.kind {
            TaskKind::BalloonTick => {
                if let Animation::Balloon(balloon) = &mut self.animation {
                    balloon.tick();
                }
            }
            TaskKind::ConfettiTick => {
                let finished = match &mut self.animation {
                    Animation::Confetti(burst) => burst.tick() == BurstStatus::Finished,
                    _ => false,
                };
                if finished {
                    self.spawn_balloon();
                }
            }
            TaskKind::CountdownTick => match self.countdown.tick() {
                CountdownTick::Running(_) => {}
                CountdownTick::Expired => self.on_timer_expired(),
            },
        }
    }

    fn spawn_balloon(&mut self) {
        self.cancel_animation();
        self.message.clear();
        let balloon = Balloon::spawn(&mut self.rng);
        tracing::debug!(
            letter = %balloon.letter,
            dx = balloon.dx,
            dy = balloon.dy,
            "Balloon spawned"
        );
        self.animation = Animation::Balloon(balloon);
        let tick = self.schedule_repeating(BALLOON_TICK_MS, TaskKind::BalloonTick);
        self.animation_task = Some(tick);
    }

    fn pop_balloon(&mut self) {
        let Animation::Balloon(balloon) = &self.animation else { return };
        let center = balloon.bbox.center();
        self.cancel_animation();
        self.animation = Animation::Confetti(ConfettiBurst::start(center, &mut self.rng));
        let tick = self.schedule_repeating(CONFETTI_TICK_MS, TaskKind::ConfettiTick);
        self.animation_task = Some(tick);
    }

    fn cancel_animation(&mut self) {
        if let Some(handle) = self.animation_task.take() {
            self.scheduler.cancel(handle);
        }
        self.animation = Animation::Idle;
    }

    fn schedule_repeating(&mut self, interval_ms: u64, kind: TaskKind) -> TaskHandle {
        let task = Task {
            kind,
            epoch: self.epoch,
        };
        self.scheduler.schedule_repeating(interval_ms, task)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Letter to type, defined only while a balloon is on screen in play.
    pub fn current_letter(&self) -> Option<char> {
        match (&self.animation, self.state) {
            (Animation::Balloon(b), GameState::Playing) => Some(b.letter),
            _ => None,
        }
    }

    pub fn balloon(&self) -> Option<&Balloon> {
        match &self.animation {
            Animation::Balloon(b) => Some(b),
            _ => None,
        }
    }

    pub fn confetti(&self) -> Option<&ConfettiBurst> {
        match &self.animation {
            Animation::Confetti(c) => Some(c),
            _ => None,
        }
    }

    /// Transient feedback line, empty when there is nothing to say.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn timer_text(&self) -> String {
        format!("Time: {} sec", self.countdown.remaining())
    }

    pub fn game_over_summary(&self) -> Option<String> {
        (self.state == GameState::GameOver)
            .then(|| format!("Your Score: {}\nHigh Score: {}", self.score, self.high_score))
    }

    pub fn retry_prompt(&self) -> Option<&'static str> {
        (self.state == GameState::GameOver).then_some(RETRY_PROMPT)
    }

    /// Scheduled tasks still outstanding.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }
}

impl Game for BalloonPop {
    fn update(&mut self, elapsed_ms: u64) {
        self.advance(elapsed_ms);
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return;
        }
        if let KeyCode::Char(c) = key.code {
            self.handle_key(c);
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        crate::ui::render_game(frame, area, self);
    }

    fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::sound::Silent;

    fn game() -> BalloonPop {
        BalloonPop::new(StdRng::seed_from_u64(11), Box::new(Silent))
    }

    fn wrong_letter_for(target: char) -> char {
        if target == 'A' {
            'b'
        } else {
            'a'
        }
    }

    #[test]
    fn live_tasks_are_one_animation_plus_the_countdown() {
        let mut g = game();
        assert_eq!(g.pending_tasks(), 2);
        let target = g.current_letter().unwrap();
        g.handle_key(target);
        assert!(g.confetti().is_some());
        assert_eq!(g.pending_tasks(), 2);
        g.start();
        g.start();
        assert_eq!(g.pending_tasks(), 2);
    }

    #[test]
    fn confetti_ignores_keys_until_the_next_balloon() {
        let mut g = game();
        let target = g.current_letter().unwrap();
        g.handle_key(target);
        assert_eq!(g.current_letter(), None);
        g.handle_key(target);
        g.handle_key(wrong_letter_for(target));
        assert_eq!(g.score(), 1);
        assert_eq!(g.message(), "");
    }

    #[test]
    fn wrong_key_sets_feedback_without_touching_the_balloon() {
        let mut g = game();
        let before = g.balloon().unwrap().clone();
        let key = wrong_letter_for(g.current_letter().unwrap());
        g.handle_key(key);
        assert_eq!(g.message(), TRY_AGAIN);
        let after = g.balloon().unwrap();
        assert_eq!(after.letter, before.letter);
        assert_eq!(after.bbox, before.bbox);
    }

    #[test]
    fn non_letters_are_ignored_while_playing() {
        let mut g = game();
        g.handle_key('5');
        g.handle_key(' ');
        assert_eq!(g.message(), "");
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn balloon_moves_every_hundred_ms() {
        let mut g = game();
        let start = g.balloon().unwrap().clone();
        g.advance(99);
        assert_eq!(g.balloon().unwrap().bbox, start.bbox);
        g.advance(1);
        assert_eq!(g.balloon().unwrap().bbox, start.bbox.shifted(start.dx, start.dy));
    }

    #[test]
    fn second_expiry_is_a_no_op() {
        let mut g = game();
        g.on_timer_expired();
        let high = g.high_score();
        g.on_timer_expired();
        assert_eq!(g.high_score(), high);
        assert_eq!(g.state(), GameState::GameOver);
        assert_eq!(g.pending_tasks(), 0);
    }

    #[test]
    fn game_over_keys_other_than_r_do_nothing() {
        let mut g = game();
        g.on_timer_expired();
        for c in ['x', 'Q', '1', ' '] {
            g.handle_key(c);
            assert_eq!(g.state(), GameState::GameOver);
        }
        g.handle_key('R');
        assert_eq!(g.state(), GameState::Playing);
    }

    #[test]
    fn ctrl_chords_are_not_game_input() {
        let mut g = game();
        let target = g.current_letter().unwrap().to_ascii_lowercase();
        g.handle_input(KeyEvent::new(KeyCode::Char(target), KeyModifiers::CONTROL));
        assert_eq!(g.score(), 0);
        g.handle_input(KeyEvent::new(KeyCode::Char(target), KeyModifiers::NONE));
        assert_eq!(g.score(), 1);
    }
}
