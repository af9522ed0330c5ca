use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Polls the terminal on a background thread and funnels key presses and
/// idle ticks into one queue, so the game sees a single ordered stream.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let ready = match event::poll(tick_rate) {
                Ok(ready) => ready,
                Err(e) => {
                    tracing::warn!(error = %e, "Terminal poll failed");
                    thread::sleep(tick_rate);
                    false
                }
            };
            let next = if ready {
                match event::read() {
                    Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    _ => continue,
                }
            } else {
                Event::Tick
            };
            if tx.send(next).is_err() {
                tracing::debug!("Event receiver dropped, stopping input thread");
                return;
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}
