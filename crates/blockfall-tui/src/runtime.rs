use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use ratatui::DefaultTerminal;

use crate::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Terminal application runtime.
///
/// Sets up the terminal, runs the event loop and dispatches events to an
/// [`App`].
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    key_release_events: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(Instant::now()),
            key_release_events: false,
        }
    }

    /// Sets the tick interval. `None` disables ticks.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Returns `true` if the terminal reports key releases and repeats.
    ///
    /// Without them every key event is a press, and a held key can only be
    /// seen through the terminal's own auto-repeat.
    #[must_use]
    pub fn reports_key_release(&self) -> bool {
        self.key_release_events
    }

    /// Runs the application until [`App::should_exit`] returns `true`.
    ///
    /// The terminal is restored on return, also on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            self.key_release_events = enable_key_release_events();
            app.init(&mut self);

            let result = self.dispatch(terminal, app);
            let restored = if self.key_release_events {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)
            } else {
                Ok(())
            };
            first_error(result, restored)
        })
    }

    fn dispatch<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick(now) => app.update(self, now),
                TuiEvent::Render => {
                    terminal.draw(|frame| app.draw(frame))?;
                }
                TuiEvent::Crossterm(event, now) => app.handle_event(self, event, now),
            }
        }
        Ok(())
    }
}

/// Keeps the error from the event loop over one from terminal cleanup.
fn first_error(result: io::Result<()>, cleanup: io::Result<()>) -> io::Result<()> {
    result.and(cleanup)
}

fn enable_key_release_events() -> bool {
    if !terminal::supports_keyboard_enhancement().unwrap_or(false) {
        return false;
    }
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_error_wins_over_cleanup_error() {
        let result = first_error(
            Err(io::Error::other("event loop")),
            Err(io::Error::other("cleanup")),
        );
        assert_eq!(result.unwrap_err().to_string(), "event loop");

        let result = first_error(Ok(()), Err(io::Error::other("cleanup")));
        assert_eq!(result.unwrap_err().to_string(), "cleanup");

        assert!(first_error(Ok(()), Ok(())).is_ok());
    }
}
