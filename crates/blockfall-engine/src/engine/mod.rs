//! Game rules and state management.
//!
//! This module builds the game on top of the core data structures:
//!
//! - [`Game`] - Board, falling piece, next piece, score and gravity timer
//! - [`GameConfig`] - Board size and gravity interval
//! - [`GameStats`] - Score, cleared lines and locked pieces
//! - [`Intent`] - Player actions understood by [`Game::apply`]
//! - [`PieceGenerator`] - Source of new piece kinds ([`RandomPieceGenerator`], [`PieceSequence`])
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`Game`]; the first two pieces are drawn at once
//! 2. The player moves and rotates the falling piece through [`Game::apply`]
//! 3. [`Game::step`] is called periodically and drops the piece one row once
//!    the gravity interval has passed
//! 4. A piece that cannot move down is locked, full lines are cleared, and the
//!    next piece spawns
//! 5. Repeat until a spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//!
//! use blockfall_engine::{DropOutcome, Game, GameConfig, Intent};
//!
//! let mut game = Game::new(GameConfig::default(), Instant::now());
//!
//! game.apply(Intent::RotateClockwise);
//! game.apply(Intent::MoveLeft);
//!
//! // Drop the piece until it locks.
//! while let Some(DropOutcome::Moved) = game.drop_step() {}
//!
//! assert_eq!(game.stats().completed_pieces(), 1);
//! ```

pub use self::{game::*, game_stats::*, intent::*, piece_generator::*};

mod game;
mod game_stats;
mod intent;
mod piece_generator;
