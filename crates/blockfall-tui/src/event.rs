use std::time::Instant;

use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum TuiEvent {
    /// Tick interval elapsed.
    Tick(Instant),
    /// Time to redraw.
    Render,
    /// Terminal input, with the time it was read.
    Crossterm(CrosstermEvent, Instant),
}
