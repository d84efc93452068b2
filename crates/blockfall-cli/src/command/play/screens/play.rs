use std::time::{Duration, Instant};

use blockfall_engine::{Game, Intent};
use blockfall_tui::{RenderMode, Runtime, Screen, ScreenTransition};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    command::play::{
        key_repeat::{KeyRepeat, RepeatKey},
        session::PlaySession,
    },
    ui::widgets::{GameDisplay, HelpLine, KeyHelp},
};

const TICK_INTERVAL: Duration = Duration::from_millis(10);
const FPS: f64 = 60.0;

const PLAYING_HELP: &[KeyHelp] = &[
    ("← →", "Move"),
    ("↓", "Soft Drop"),
    ("A", "Rotate ↻"),
    ("D", "Rotate ↺"),
    ("Q", "Menu"),
];
const GAME_OVER_HELP: &[KeyHelp] = &[("Any key", "Menu"), ("Ctrl-C", "Exit")];

/// A single game in progress.
///
/// Gravity and held keys are advanced on every tick. Held keys need key
/// release events from the terminal; without them every press (including the
/// terminal's own auto-repeat) is applied once as it arrives.
#[derive(Debug)]
pub(crate) struct PlayScreen {
    session: PlaySession,
    game: Game,
    keys: KeyRepeat,
    track_held_keys: bool,
}

impl PlayScreen {
    pub(crate) fn new(session: PlaySession, now: Instant) -> Self {
        Self {
            game: session.new_game(now),
            keys: KeyRepeat::new(session.repeat_config()),
            track_held_keys: false,
            session,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> ScreenTransition {
        if super::is_exit_key(&key) {
            return ScreenTransition::Exit;
        }
        let pressed = key.kind == KeyEventKind::Press;

        if self.game.is_game_over() {
            return if pressed {
                ScreenTransition::Pop
            } else {
                ScreenTransition::Stay
            };
        }

        if let Some(repeat_key) = RepeatKey::from_code(key.code) {
            match key.kind {
                KeyEventKind::Press if self.track_held_keys => {
                    self.keys
                        .press(repeat_key, now, |intent| self.game.apply(intent));
                }
                KeyEventKind::Press => _ = self.game.apply(repeat_key.intent()),
                KeyEventKind::Release => self.keys.release(repeat_key),
                // held keys are repeated on ticks
                KeyEventKind::Repeat => {}
            }
            return ScreenTransition::Stay;
        }

        if !pressed {
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Char('a') => _ = self.game.apply(Intent::RotateClockwise),
            KeyCode::Char('d') => _ = self.game.apply(Intent::RotateCounterClockwise),
            KeyCode::Char('q') => return ScreenTransition::Pop,
            _ => {}
        }
        ScreenTransition::Stay
    }
}

impl Screen for PlayScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(TICK_INTERVAL));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        self.track_held_keys = runtime.reports_key_release();
    }

    fn on_inactive(&mut self, _runtime: &mut Runtime) {
        self.keys.release_all();
    }

    fn on_close(&mut self, _runtime: &mut Runtime) {
        self.session.record(&self.game);
    }

    fn handle_event(
        &mut self,
        _runtime: &mut Runtime,
        event: &Event,
        now: Instant,
    ) -> ScreenTransition {
        match event.as_key_event() {
            Some(key) => self.handle_key(key, now),
            None => ScreenTransition::Stay,
        }
    }

    fn update(&mut self, _runtime: &mut Runtime, now: Instant) {
        if self.game.is_game_over() {
            return;
        }
        self.keys.poll(now, |intent| self.game.apply(intent));
        self.game.step(now);
        if self.game.is_game_over() {
            self.keys.release_all();
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help = if self.game.is_game_over() {
            GAME_OVER_HELP
        } else {
            PLAYING_HELP
        };
        let [game_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(GameDisplay::new(&self.game), game_area);
        frame.render_widget(HelpLine::new(help), help_area);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameConfig, PiecePosition};
    use crossterm::event::{KeyEventState, KeyModifiers};

    use super::*;
    use crate::command::play::key_repeat::RepeatConfig;

    fn screen(now: Instant) -> PlayScreen {
        let session = PlaySession::new(
            GameConfig::default(),
            Some("0f0e0d0c0b0a09080706050403020100".parse().unwrap()),
            RepeatConfig::default(),
        );
        PlayScreen::new(session, now)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind_and_state(
            code,
            KeyModifiers::NONE,
            kind,
            KeyEventState::NONE,
        ))
    }

    fn send(screen: &mut PlayScreen, event: &Event, now: Instant) -> ScreenTransition {
        screen.handle_event(&mut Runtime::new(), event, now)
    }

    fn position(screen: &PlayScreen) -> PiecePosition {
        screen.game.current_piece().position()
    }

    #[test]
    fn test_keys_drive_the_falling_piece() {
        let now = Instant::now();
        let mut screen = screen(now);
        let spawn = position(&screen);

        send(&mut screen, &key(KeyCode::Left, KeyEventKind::Press), now);
        assert_eq!(position(&screen), spawn.translated(-1, 0));
        send(&mut screen, &key(KeyCode::Down, KeyEventKind::Press), now);
        assert_eq!(position(&screen), spawn.translated(-1, 1));
        send(&mut screen, &key(KeyCode::Char('a'), KeyEventKind::Press), now);
        assert_eq!(screen.game.current_piece().rotation().index(), 1);
        send(&mut screen, &key(KeyCode::Char('d'), KeyEventKind::Press), now);
        assert_eq!(screen.game.current_piece().rotation().index(), 0);

        // Releases do nothing without held-key tracking.
        send(&mut screen, &key(KeyCode::Left, KeyEventKind::Release), now);
        assert_eq!(position(&screen), spawn.translated(-1, 1));
    }

    #[test]
    fn test_held_key_repeats_on_ticks() {
        let start = Instant::now();
        let mut screen = screen(start);
        screen.track_held_keys = true;
        let spawn = position(&screen);
        let mut runtime = Runtime::new();

        send(&mut screen, &key(KeyCode::Left, KeyEventKind::Press), start);
        assert_eq!(position(&screen), spawn.translated(-1, 0));

        screen.update(&mut runtime, start + Duration::from_millis(100));
        assert_eq!(position(&screen), spawn.translated(-1, 0));
        screen.update(&mut runtime, start + Duration::from_millis(130));
        assert_eq!(position(&screen), spawn.translated(-2, 0));

        // Terminal repeats are ignored while tracking held keys.
        send(&mut screen, &key(KeyCode::Left, KeyEventKind::Repeat), start);
        assert_eq!(position(&screen), spawn.translated(-2, 0));

        send(&mut screen, &key(KeyCode::Left, KeyEventKind::Release), start);
        screen.update(&mut runtime, start + Duration::from_millis(300));
        assert_eq!(position(&screen), spawn.translated(-2, 0));
    }

    #[test]
    fn test_gravity_runs_on_ticks() {
        let start = Instant::now();
        let mut screen = screen(start);
        let spawn = position(&screen);

        screen.update(&mut Runtime::new(), start + Duration::from_millis(700));
        assert_eq!(position(&screen), spawn.translated(0, 1));
    }

    #[test]
    fn test_q_returns_to_menu_and_records_game() {
        let now = Instant::now();
        let mut screen = screen(now);
        let session = screen.session.clone();

        let transition = send(&mut screen, &key(KeyCode::Char('q'), KeyEventKind::Press), now);
        assert!(matches!(transition, ScreenTransition::Pop));

        screen.on_close(&mut Runtime::new());
        let summary = session.last_game().unwrap();
        assert!(!summary.game_over);
        assert_eq!(summary.pieces, 0);
    }

    #[test]
    fn test_any_key_leaves_finished_game() {
        let now = Instant::now();
        let mut screen = screen(now);
        while !screen.game.is_game_over() {
            screen.game.apply(Intent::SoftDrop);
        }

        let release = send(&mut screen, &key(KeyCode::Left, KeyEventKind::Release), now);
        assert!(matches!(release, ScreenTransition::Stay));
        let press = send(&mut screen, &key(KeyCode::Char('x'), KeyEventKind::Press), now);
        assert!(matches!(press, ScreenTransition::Pop));
    }

    #[test]
    fn test_ctrl_c_exits() {
        let now = Instant::now();
        let mut screen = screen(now);
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(
            send(&mut screen, &event, now),
            ScreenTransition::Exit
        ));
    }
}
