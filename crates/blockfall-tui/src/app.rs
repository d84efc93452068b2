use std::time::Instant;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event, after the terminal is set up.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles a terminal event observed at `now`.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event, now: Instant);

    fn draw(&self, frame: &mut Frame);

    /// Advances time-driven state (called on each tick).
    fn update(&mut self, runtime: &mut Runtime, now: Instant);
}
