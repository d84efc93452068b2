use std::time::Instant;

use blockfall_tui::{RenderMode, Runtime, Screen, ScreenTransition};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Text},
    widgets::{Block, Paragraph},
};

use super::PlayScreen;
use crate::{
    command::play::session::PlaySession,
    ui::widgets::{HelpLine, KeyHelp, style},
};

const HELP: &[KeyHelp] = &[("↑ ↓", "Select"), ("Enter", "Confirm"), ("Ctrl-C", "Exit")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
enum MenuItem {
    Play,
    Quit,
}

impl MenuItem {
    const ALL: [Self; 2] = [Self::Play, Self::Quit];

    fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Quit => "Quit",
        }
    }
}

/// Start menu. Confirming "Play" pushes a fresh game; the menu comes back
/// when that game is closed.
#[derive(Debug)]
pub(crate) struct MenuScreen {
    session: PlaySession,
    selected: usize,
}

impl MenuScreen {
    pub(crate) fn new(session: PlaySession) -> Self {
        Self {
            session,
            selected: 0,
        }
    }

    fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::ALL.len();
    }

    fn select_previous(&mut self) {
        self.selected = (self.selected + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
    }

    fn confirm(&self, now: Instant) -> ScreenTransition {
        match self.selected() {
            MenuItem::Play => ScreenTransition::Push(Box::new(PlayScreen::new(
                self.session.clone(),
                now,
            ))),
            MenuItem::Quit => ScreenTransition::Exit,
        }
    }
}

impl Screen for MenuScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(
        &mut self,
        _runtime: &mut Runtime,
        event: &Event,
        now: Instant,
    ) -> ScreenTransition {
        let Some(key) = event
            .as_key_event()
            .filter(|key| key.kind == KeyEventKind::Press)
        else {
            return ScreenTransition::Stay;
        };
        if super::is_exit_key(&key) {
            return ScreenTransition::Exit;
        }
        match key.code {
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter => return self.confirm(now),
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn update(&mut self, _runtime: &mut Runtime, _now: Instant) {}

    fn draw(&self, frame: &mut Frame) {
        let mut lines = vec![Line::styled("B L O C K F A L L", style::TITLE), Line::default()];
        for (i, item) in MenuItem::ALL.into_iter().enumerate() {
            let line = if i == self.selected {
                Line::styled(format!("> {} <", item.label()), style::SELECTED)
            } else {
                Line::styled(item.label(), style::DEFAULT)
            };
            lines.push(line);
        }
        if let Some(summary) = self.session.last_game() {
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("Last game: {} points, {} lines", summary.score, summary.lines),
                style::DIM,
            ));
        }

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2;
        let [menu_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let menu_area = menu_area.centered(Constraint::Length(36), Constraint::Length(height));

        let menu = Paragraph::new(Text::from(lines).centered())
            .block(Block::bordered().style(style::DEFAULT));
        frame.render_widget(menu, menu_area);
        frame.render_widget(HelpLine::new(HELP), help_area);
    }
}
