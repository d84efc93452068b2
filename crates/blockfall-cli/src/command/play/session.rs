use std::{cell::Cell, rc::Rc, time::Instant};

use blockfall_engine::{Game, GameConfig, PieceSeed};

use super::key_repeat::RepeatConfig;

/// Settings shared by every game started from the menu, plus the result of
/// the most recent one.
#[derive(Debug, Clone)]
pub(crate) struct PlaySession {
    config: GameConfig,
    seed: Option<PieceSeed>,
    repeat: RepeatConfig,
    last_game: Rc<Cell<Option<GameSummary>>>,
}

impl PlaySession {
    pub(crate) fn new(config: GameConfig, seed: Option<PieceSeed>, repeat: RepeatConfig) -> Self {
        Self {
            config,
            seed,
            repeat,
            last_game: Rc::default(),
        }
    }

    /// Starts a new game with the configured seed, or a fresh random one.
    pub(crate) fn new_game(&self, now: Instant) -> Game {
        match self.seed {
            Some(seed) => Game::with_seed(self.config, seed, now),
            None => Game::new(self.config, now),
        }
    }

    pub(crate) fn repeat_config(&self) -> RepeatConfig {
        self.repeat
    }

    pub(crate) fn record(&self, game: &Game) {
        self.last_game.set(Some(GameSummary::from_game(game)));
    }

    pub(crate) fn last_game(&self) -> Option<GameSummary> {
        self.last_game.get()
    }
}

/// One-line result of a finished or abandoned game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display(
    "score {score}, lines {lines}, pieces {pieces}, seed {seed}{}",
    if *game_over { "" } else { " (quit)" }
)]
pub(crate) struct GameSummary {
    pub(crate) score: usize,
    pub(crate) lines: usize,
    pub(crate) pieces: usize,
    pub(crate) seed: PieceSeed,
    pub(crate) game_over: bool,
}

impl GameSummary {
    pub(crate) fn from_game(game: &Game) -> Self {
        let stats = game.stats();
        Self {
            score: stats.score(),
            lines: stats.total_cleared_lines(),
            pieces: stats.completed_pieces(),
            seed: game.generator().seed(),
            game_over: game.is_game_over(),
        }
    }
}
