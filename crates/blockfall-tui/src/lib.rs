//! Terminal runtime for screen-based games.
//!
//! [`Runtime`] owns the event loop: it emits periodic ticks, renders when the
//! state is dirty, and forwards terminal input. Every tick and every input is
//! stamped with the [`Instant`](std::time::Instant) it was observed at, so
//! timing logic never has to read the clock itself.
//!
//! Applications are usually a [`ScreenStack`] of [`Screen`]s.

pub use self::{
    app::App,
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
