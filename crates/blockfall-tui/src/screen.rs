use std::{fmt, time::Instant};

use crossterm::event::Event;
use ratatui::Frame;

use crate::{App, Runtime};

/// One screen of the application.
///
/// # Lifecycle
///
/// ```text
/// Create
///   ↓
/// on_active() ←──────────┐
///   ↓                     │
/// (Foreground)            │ screen above is popped
///   ↓                     │
/// on_inactive()           │
///   ↓                     │
/// (Background) ──────────┘
///   ↓
/// on_close()  ← Pop/Exit only
///   ↓
/// Drop
/// ```
///
/// Runtime settings such as the tick interval belong in [`on_active`], so they
/// are reapplied whenever the screen comes back to the foreground.
///
/// ```rust
/// use std::time::{Duration, Instant};
///
/// use blockfall_tui::{RenderMode, Runtime, Screen, ScreenTransition};
/// use crossterm::event::Event;
/// use ratatui::Frame;
///
/// #[derive(Debug)]
/// struct Clock {
///     now: Option<Instant>,
/// }
///
/// impl Screen for Clock {
///     fn on_active(&mut self, runtime: &mut Runtime) {
///         runtime.set_tick_interval(Some(Duration::from_secs(1)));
///         runtime.set_render_mode(RenderMode::OnDirty);
///     }
///
///     fn on_inactive(&mut self, _runtime: &mut Runtime) {}
///     fn on_close(&mut self, _runtime: &mut Runtime) {}
///
///     fn handle_event(
///         &mut self,
///         _runtime: &mut Runtime,
///         _event: &Event,
///         _now: Instant,
///     ) -> ScreenTransition {
///         ScreenTransition::Exit
///     }
///
///     fn update(&mut self, _runtime: &mut Runtime, now: Instant) {
///         self.now = Some(now);
///     }
///
///     fn draw(&self, _frame: &mut Frame) {}
/// }
/// ```
///
/// [`on_active`]: Self::on_active
pub trait Screen: fmt::Debug {
    /// Called when this screen comes to the foreground: at startup, when it is
    /// pushed, and when the screen above it is popped.
    fn on_active(&mut self, runtime: &mut Runtime);

    /// Called when this screen leaves the foreground, either because another
    /// screen is pushed on top or because it is being removed.
    fn on_inactive(&mut self, runtime: &mut Runtime);

    /// Called after [`on_inactive`](Self::on_inactive) when this screen is
    /// removed from the stack for good.
    fn on_close(&mut self, runtime: &mut Runtime);

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event, now: Instant)
    -> ScreenTransition;

    fn update(&mut self, runtime: &mut Runtime, now: Instant);

    fn draw(&self, frame: &mut Frame);
}

/// What the screen stack does after an event.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Put a new screen on top; the current one goes to the background.
    Push(Box<dyn Screen>),
    /// Close the current screen and return to the one below.
    Pop,
    /// Close every screen and leave the application.
    Exit,
}

/// Stack of screens; only the top one receives events and is drawn.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    #[must_use]
    pub fn new(initial: Box<dyn Screen + 'a>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                if let Some(mut screen) = self.screens.pop() {
                    screen.on_inactive(runtime);
                    screen.on_close(runtime);
                }
                if let Some(previous) = self.screens.last_mut() {
                    previous.on_active(runtime);
                }
            }
            ScreenTransition::Exit => {
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_inactive(runtime);
                    screen.on_close(runtime);
                }
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack<'_> {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event, now: Instant) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(runtime, &event, now);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime, now: Instant) {
        if let Some(current) = self.screens.last_mut() {
            current.update(runtime, now);
        }
    }
}
