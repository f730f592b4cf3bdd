use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::ai::GenOutcome;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// Terminal gained focus.
    FocusGained,
    /// Terminal lost focus. During a timed activity this is a breach.
    FocusLost,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
    /// A generation worker finished. The sequence number identifies which
    /// request it answers.
    Gen(u64, GenOutcome),
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let poll_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if poll_tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::FocusGained) => {
                            if poll_tx.send(AppEvent::FocusGained).is_err() {
                                return;
                            }
                        }
                        Ok(Event::FocusLost) => {
                            if poll_tx.send(AppEvent::FocusLost).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if poll_tx.send(AppEvent::Resize(w, h)).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else if poll_tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx }
    }

    /// Clone handed to generation workers so their outcomes arrive through
    /// the same channel as input.
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
