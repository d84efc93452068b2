use std::{
    mem,
    time::{Duration, Instant},
};

use crate::core::{
    board::{Board, BoardSize},
    piece::{Piece, PieceKind, PieceRotation, RotationDirection},
};

use super::{
    GameStats, Intent,
    piece_generator::{PieceGenerator, PieceSeed, RandomPieceGenerator},
};

/// Settings fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: BoardSize,
    /// Minimum time between two gravity steps.
    pub gravity_interval: Duration,
}

impl GameConfig {
    pub const DEFAULT_GRAVITY_INTERVAL: Duration = Duration::from_millis(625);
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BoardSize::DEFAULT,
            gravity_interval: Self::DEFAULT_GRAVITY_INTERVAL,
        }
    }
}

/// Result of locking the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub cleared_lines: usize,
    /// The promoted piece did not fit at the spawn position; the game is over.
    pub topped_out: bool,
}

/// Result of one downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move down and was locked.
    Locked(LockOutcome),
}

/// Complete state of a single game.
///
/// `Game` owns the board, the falling piece, the previewed next piece and the
/// statistics. Every change goes through the collision check of
/// [`Board::is_blocked`]: a candidate piece is computed, checked, and only
/// then stored, so a rejected move or rotation leaves no trace.
///
/// Once the game is over every mutating method is a no-op.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use blockfall_engine::{Game, GameConfig, Intent, PieceKind, PieceSequence};
///
/// let start = Instant::now();
/// let mut game = Game::with_generator(
///     GameConfig::default(),
///     PieceSequence::new([PieceKind::T, PieceKind::I]),
///     start,
/// );
///
/// assert!(game.apply(Intent::MoveLeft));
/// assert!(game.apply(Intent::RotateClockwise));
///
/// // Gravity only fires once the interval has fully elapsed.
/// assert!(game.step(start + Duration::from_millis(100)).is_none());
/// assert!(game.step(start + Duration::from_secs(1)).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Game<G = RandomPieceGenerator> {
    board: Board,
    current: Piece,
    next: Piece,
    stats: GameStats,
    game_over: bool,
    gravity_interval: Duration,
    last_drop: Instant,
    generator: G,
}

impl Game {
    /// Creates a game with randomly generated pieces.
    #[must_use]
    pub fn new(config: GameConfig, now: Instant) -> Self {
        Self::with_generator(config, RandomPieceGenerator::new(), now)
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: PieceSeed, now: Instant) -> Self {
        Self::with_generator(config, RandomPieceGenerator::with_seed(seed), now)
    }
}

impl<G> Game<G>
where
    G: PieceGenerator,
{
    /// Creates a game on an empty board drawing pieces from `generator`.
    #[must_use]
    pub fn with_generator(config: GameConfig, generator: G, now: Instant) -> Self {
        Self::with_board(
            Board::new(config.board_size),
            config.gravity_interval,
            generator,
            now,
        )
    }

    /// Creates a game on a prepared board.
    ///
    /// The first piece is checked like any other spawn: if it does not fit,
    /// the game starts already over.
    #[must_use]
    pub fn with_board(
        board: Board,
        gravity_interval: Duration,
        mut generator: G,
        now: Instant,
    ) -> Self {
        let spawn = board.size().spawn_position();
        let current = Piece::new(generator.next_kind(), spawn);
        let next = Piece::new(generator.next_kind(), spawn);
        let game_over = board.is_blocked(current.cells());
        Self {
            board,
            current,
            next,
            stats: GameStats::new(),
            game_over,
            gravity_interval,
            last_drop: now,
            generator,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    /// Returns what a preview of the next piece shows: its kind and its
    /// spawn-orientation offsets.
    #[must_use]
    pub fn next_preview(&self) -> (PieceKind, &'static [(i32, i32); 4]) {
        let kind = self.next.kind();
        (kind, kind.offsets(PieceRotation::SPAWN))
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        self.gravity_interval
    }

    /// Time of the last gravity step (or of the game start).
    #[must_use]
    pub fn last_drop(&self) -> Instant {
        self.last_drop
    }

    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Shifts the falling piece by `(dx, dy)` if the target cells are free.
    ///
    /// Returns `false` and leaves the piece untouched otherwise.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.game_over {
            return false;
        }
        let candidate = self.current.moved(dx, dy);
        self.commit(candidate)
    }

    /// Rotates the falling piece one step if the rotated cells are free.
    ///
    /// There are no wall kicks: a blocked rotation is simply rejected.
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        if self.game_over {
            return false;
        }
        let candidate = self.current.rotated(direction);
        self.commit(candidate)
    }

    fn commit(&mut self, candidate: Piece) -> bool {
        if self.board.is_blocked(candidate.cells()) {
            return false;
        }
        self.current = candidate;
        true
    }

    /// Moves the falling piece down one row, locking it if it cannot move.
    ///
    /// Returns `None` once the game is over.
    pub fn drop_step(&mut self) -> Option<DropOutcome> {
        if self.game_over {
            return None;
        }
        if self.try_move(0, 1) {
            return Some(DropOutcome::Moved);
        }
        self.lock().map(DropOutcome::Locked)
    }

    /// Locks the falling piece into the board.
    ///
    /// Cells above the board are lost. Full lines are cleared and scored, the
    /// next piece becomes the falling piece, and a new next piece is drawn. If
    /// the promoted piece is blocked at its spawn position, the game is over.
    ///
    /// Returns `None` once the game is over.
    pub fn lock(&mut self) -> Option<LockOutcome> {
        if self.game_over {
            return None;
        }

        self.board.fill_piece(&self.current);
        let cleared_lines = self.board.clear_lines();
        self.stats.complete_piece_lock(cleared_lines);

        let next = Piece::new(
            self.generator.next_kind(),
            self.board.size().spawn_position(),
        );
        self.current = mem::replace(&mut self.next, next);
        if self.board.is_blocked(self.current.cells()) {
            self.game_over = true;
        }

        Some(LockOutcome {
            cleared_lines,
            topped_out: self.game_over,
        })
    }

    /// Advances gravity.
    ///
    /// If more than the gravity interval has passed since the last gravity
    /// step, performs one [`drop_step`](Self::drop_step) and restarts the
    /// interval at `now`. However long the pause was, at most one step is
    /// taken per call.
    pub fn step(&mut self, now: Instant) -> Option<DropOutcome> {
        if self.game_over || now.saturating_duration_since(self.last_drop) <= self.gravity_interval
        {
            return None;
        }
        let outcome = self.drop_step();
        self.last_drop = now;
        outcome
    }

    /// Applies a player intent. Returns `true` if the game state changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.try_move(-1, 0),
            Intent::MoveRight => self.try_move(1, 0),
            Intent::SoftDrop => self.drop_step().is_some(),
            Intent::RotateClockwise => self.rotate(RotationDirection::Clockwise),
            Intent::RotateCounterClockwise => self.rotate(RotationDirection::CounterClockwise),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Block, PiecePosition, PieceSequence};

    use super::*;

    const INTERVAL: Duration = GameConfig::DEFAULT_GRAVITY_INTERVAL;

    fn sequence_game(kinds: &[PieceKind]) -> (Game<PieceSequence>, Instant) {
        let start = Instant::now();
        let game = Game::with_generator(
            GameConfig::default(),
            PieceSequence::new(kinds.iter().copied()),
            start,
        );
        (game, start)
    }

    fn board_game(art: &str, kinds: &[PieceKind]) -> Game<PieceSequence> {
        Game::with_board(
            Board::from_ascii(art),
            INTERVAL,
            PieceSequence::new(kinds.iter().copied()),
            Instant::now(),
        )
    }

    fn filled_count(board: &Board) -> usize {
        board.rows().flatten().filter(|b| !b.is_empty()).count()
    }

    #[test]
    fn test_new_game_spawns_at_origin() {
        let (game, _) = sequence_game(&[PieceKind::I, PieceKind::O]);

        let current = game.current_piece();
        assert_eq!(current.kind(), PieceKind::I);
        assert_eq!(current.rotation(), PieceRotation::SPAWN);
        assert_eq!(current.position(), PiecePosition::new(4, 0));
        assert_eq!(current.cells(), [(4, 1), (5, 1), (6, 1), (7, 1)]);

        assert_eq!(game.next_piece().kind(), PieceKind::O);
        assert_eq!(game.score(), 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_spawn_follows_configured_width() {
        let config = GameConfig {
            board_size: BoardSize::new(9, 15).unwrap(),
            ..GameConfig::default()
        };
        let game = Game::with_generator(config, PieceSequence::new([PieceKind::T]), Instant::now());
        assert_eq!(game.current_piece().position(), PiecePosition::new(2, 0));
        assert_eq!(game.next_piece().position(), PiecePosition::new(2, 0));
    }

    #[test]
    fn test_move_into_wall_is_rejected() {
        let (mut game, _) = sequence_game(&[PieceKind::T]);
        game.current = Piece::new(PieceKind::T, PiecePosition::new(0, 5));

        assert!(!game.try_move(-1, 0));
        assert_eq!(game.current_piece().position(), PiecePosition::new(0, 5));
    }

    #[test]
    fn test_move_changes_origin_by_exact_offset() {
        let (mut game, _) = sequence_game(&[PieceKind::O]);
        let start = game.current_piece().position();

        let mut moves = 0;
        while game.try_move(1, 0) {
            moves += 1;
            assert_eq!(game.current_piece().position(), start.translated(moves, 0));
        }
        // O occupies columns 1 and 2 of its box: origin stops at width - 3.
        assert_eq!(game.current_piece().position(), PiecePosition::new(9, 0));
        assert!(!game.try_move(1, 0));
        assert_eq!(game.current_piece().position(), PiecePosition::new(9, 0));
    }

    #[test]
    fn test_move_onto_block_is_rejected() {
        let (mut game, _) = sequence_game(&[PieceKind::O]);
        // O spawn cells: (5, 0), (6, 0), (5, 1), (6, 1)
        game.board.fill_block_at(5, 2, Block::Piece(PieceKind::L));

        let before = *game.current_piece();
        assert!(!game.try_move(0, 1));
        assert_eq!(*game.current_piece(), before);
        assert!(game.try_move(-1, 0));
    }

    #[test]
    fn test_rotation_succeeds_on_open_board() {
        let (mut game, _) = sequence_game(&[PieceKind::T]);
        assert!(game.rotate(RotationDirection::Clockwise));
        assert_eq!(game.current_piece().rotation().index(), 1);
        assert!(game.rotate(RotationDirection::CounterClockwise));
        assert!(game.rotate(RotationDirection::CounterClockwise));
        assert_eq!(game.current_piece().rotation().index(), 3);
    }

    #[test]
    fn test_rotation_against_wall_has_no_kick() {
        let (mut game, _) = sequence_game(&[PieceKind::I]);
        // Vertical I hugging the left wall: cells in column 0.
        let vertical =
            Piece::new(PieceKind::I, PiecePosition::new(-1, 5)).rotated(RotationDirection::CounterClockwise);
        game.current = vertical;

        assert!(!game.rotate(RotationDirection::Clockwise));
        assert_eq!(*game.current_piece(), vertical);
        assert!(!game.rotate(RotationDirection::CounterClockwise));
        assert_eq!(*game.current_piece(), vertical);
        assert!(game.try_move(1, 0));
    }

    #[test]
    fn test_rotation_onto_block_is_rejected() {
        let (mut game, _) = sequence_game(&[PieceKind::T]);
        // Both neighbouring states of this T need (5, 7).
        let piece = Piece::new(PieceKind::T, PiecePosition::new(4, 5));
        game.current = piece;
        game.board.fill_block_at(5, 7, Block::Piece(PieceKind::Z));

        assert!(!game.rotate(RotationDirection::Clockwise));
        assert_eq!(game.current_piece().rotation(), PieceRotation::SPAWN);
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 5));
        assert!(!game.rotate(RotationDirection::CounterClockwise));
        assert_eq!(*game.current_piece(), piece);
        assert_eq!(filled_count(game.board()), 1);
    }

    #[test]
    fn test_o_rotation_keeps_cells() {
        let (mut game, _) = sequence_game(&[PieceKind::O]);
        let cells = game.current_piece().cells();
        for _ in 0..4 {
            assert!(game.rotate(RotationDirection::Clockwise));
            assert_eq!(game.current_piece().cells(), cells);
        }
    }

    #[test]
    fn test_piece_may_overhang_top_edge() {
        let (mut game, _) = sequence_game(&[PieceKind::I]);
        // Spawn I sits in row 1, so one row of headroom is above the board.
        assert!(game.try_move(0, -1));
        assert!(game.try_move(0, -1));
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, -2));
    }

    #[test]
    fn test_lock_discards_cells_above_board() {
        let (mut game, _) = sequence_game(&[PieceKind::I, PieceKind::T]);
        game.current = Piece::new(PieceKind::I, PiecePosition::new(0, -2))
            .rotated(RotationDirection::Clockwise);
        // cells: (2, -2), (2, -1), (2, 0), (2, 1)

        let outcome = game.lock().unwrap();
        assert_eq!(outcome.cleared_lines, 0);
        assert_eq!(filled_count(game.board()), 2);
        assert_eq!(game.board().block_at(2, 0), Some(Block::Piece(PieceKind::I)));
        assert_eq!(game.board().block_at(2, 1), Some(Block::Piece(PieceKind::I)));
    }

    #[test]
    fn test_floor_contact_locks_and_clears_line() {
        let (mut game, _) = sequence_game(&[PieceKind::I, PieceKind::T, PieceKind::O]);
        for x in (0..12).filter(|x| !(4..8).contains(x)) {
            game.board.fill_block_at(x, 21, Block::Piece(PieceKind::Z));
        }
        game.board.fill_block_at(0, 20, Block::Piece(PieceKind::S));
        game.current = Piece::new(PieceKind::I, PiecePosition::new(4, 20));

        assert!(!game.try_move(0, 1));
        let outcome = game.drop_step();
        assert_eq!(
            outcome,
            Some(DropOutcome::Locked(LockOutcome {
                cleared_lines: 1,
                topped_out: false,
            }))
        );
        assert_eq!(game.score(), 100);
        assert_eq!(filled_count(game.board()), 1);
        assert_eq!(game.board().block_at(0, 21), Some(Block::Piece(PieceKind::S)));
        assert!(game.board().rows().next().unwrap().iter().all(|b| b.is_empty()));
        assert_eq!(game.board().rows().count(), 22);

        // Promotion: T was next, O is drawn as the new next piece.
        assert_eq!(game.current_piece().kind(), PieceKind::T);
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 0));
        assert_eq!(game.next_piece().kind(), PieceKind::O);
    }

    #[test]
    fn test_lock_clears_non_adjacent_lines_and_keeps_order() {
        let mut game = board_game(
            "
            ....
            ....
            ....
            ....
            ....
            OOO.
            T...
            OOO.
            OOO.
            ",
            &[PieceKind::I],
        );
        // Vertical I in column 3, rows 5 to 8.
        game.current = Piece::new(PieceKind::I, PiecePosition::new(1, 5))
            .rotated(RotationDirection::Clockwise);

        let outcome = game.lock().unwrap();
        assert_eq!(outcome.cleared_lines, 3);
        assert_eq!(game.score(), 300);
        assert_eq!(
            *game.board(),
            Board::from_ascii(
                "
                ....
                ....
                ....
                ....
                ....
                ....
                ....
                ....
                T..I
                "
            )
        );
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let (mut game, start) = sequence_game(&[PieceKind::T, PieceKind::O]);
        game.current = game.current.moved(0, 15);
        game.board.fill_block_at(5, 1, Block::Piece(PieceKind::J));

        let outcome = game.lock().unwrap();
        assert!(outcome.topped_out);
        assert!(game.is_game_over());

        // Nothing changes afterwards.
        let board = game.board().clone();
        let current = *game.current_piece();
        assert!(!game.try_move(1, 0));
        assert!(!game.rotate(RotationDirection::Clockwise));
        assert_eq!(game.drop_step(), None);
        assert_eq!(game.lock(), None);
        assert_eq!(game.step(start + INTERVAL * 100), None);
        assert!(!game.apply(Intent::SoftDrop));
        assert_eq!(*game.board(), board);
        assert_eq!(*game.current_piece(), current);
        assert_eq!(game.last_drop(), start);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_game_on_blocked_board_starts_over() {
        let game = board_game(
            "
            .TT.
            ....
            ",
            &[PieceKind::O],
        );
        assert!(game.is_game_over());
    }

    #[test]
    fn test_gravity_waits_for_full_interval() {
        let (mut game, start) = sequence_game(&[PieceKind::T]);
        assert_eq!(game.step(start + INTERVAL), None);
        assert_eq!(game.last_drop(), start);
        assert_eq!(game.current_piece().position().y(), 0);

        let now = start + INTERVAL + Duration::from_millis(1);
        assert_eq!(game.step(now), Some(DropOutcome::Moved));
        assert_eq!(game.last_drop(), now);
        assert_eq!(game.current_piece().position().y(), 1);
    }

    #[test]
    fn test_gravity_does_not_catch_up_after_stall() {
        let (mut game, start) = sequence_game(&[PieceKind::T]);
        let now = start + INTERVAL * 10;

        assert_eq!(game.step(now), Some(DropOutcome::Moved));
        assert_eq!(game.current_piece().position().y(), 1);
        assert_eq!(game.last_drop(), now);

        assert_eq!(game.step(now), None);
        assert_eq!(game.step(now + INTERVAL), None);
        assert_eq!(game.current_piece().position().y(), 1);
    }

    #[test]
    fn test_gravity_locks_resting_piece() {
        let (mut game, start) = sequence_game(&[PieceKind::O, PieceKind::I]);
        // O occupies rows 0 and 1 of its box: origin y = 20 rests on the floor.
        game.current = game.current.moved(0, 20);

        let now = start + INTERVAL * 2;
        let outcome = game.step(now).unwrap();
        assert!(outcome.is_locked());
        assert_eq!(game.last_drop(), now);
        assert_eq!(game.current_piece().kind(), PieceKind::I);
        assert_eq!(filled_count(game.board()), 4);
    }

    #[test]
    fn test_soft_drop_leaves_gravity_timer_alone() {
        let (mut game, start) = sequence_game(&[PieceKind::T]);
        assert!(game.apply(Intent::SoftDrop));
        assert_eq!(game.current_piece().position().y(), 1);
        assert_eq!(game.last_drop(), start);
    }

    #[test]
    fn test_apply_maps_intents() {
        let (mut game, _) = sequence_game(&[PieceKind::T]);
        let spawn = game.current_piece().position();

        assert!(game.apply(Intent::MoveLeft));
        assert_eq!(game.current_piece().position(), spawn.translated(-1, 0));
        assert!(game.apply(Intent::MoveRight));
        assert!(game.apply(Intent::MoveRight));
        assert_eq!(game.current_piece().position(), spawn.translated(1, 0));
        assert!(game.apply(Intent::RotateClockwise));
        assert_eq!(game.current_piece().rotation().index(), 1);
        assert!(game.apply(Intent::RotateCounterClockwise));
        assert_eq!(game.current_piece().rotation().index(), 0);
    }

    #[test]
    fn test_next_preview_uses_spawn_orientation() {
        let (game, _) = sequence_game(&[PieceKind::T, PieceKind::L]);
        let (kind, offsets) = game.next_preview();
        assert_eq!(kind, PieceKind::L);
        assert_eq!(offsets, &[(2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_long_game_keeps_invariants() {
        let intents = [
            Intent::MoveLeft,
            Intent::SoftDrop,
            Intent::RotateClockwise,
            Intent::MoveRight,
            Intent::MoveRight,
            Intent::SoftDrop,
            Intent::RotateCounterClockwise,
            Intent::SoftDrop,
        ];
        let mut game = Game::with_seed(
            GameConfig::default(),
            "0123456789abcdeffedcba9876543210".parse().unwrap(),
            Instant::now(),
        );

        let mut last_score = 0;
        for intent in intents.iter().cycle().take(20_000) {
            let was_over = game.is_game_over();
            game.apply(*intent);

            assert!(game.score() >= last_score);
            last_score = game.score();
            assert!(!was_over || game.is_game_over());
            assert_eq!(game.board().rows().count(), 22);
            assert_eq!(
                game.score(),
                game.stats().total_cleared_lines() * crate::SCORE_PER_LINE
            );
        }
        assert!(game.is_game_over());
    }
}
