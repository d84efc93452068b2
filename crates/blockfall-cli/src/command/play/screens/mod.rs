use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub(crate) use self::{menu::MenuScreen, play::PlayScreen};

mod menu;
mod play;

/// Ctrl-C leaves the application from any screen.
fn is_exit_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && key.code == KeyCode::Char('c')
}
