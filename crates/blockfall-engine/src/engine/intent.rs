/// A player action the game knows how to apply to the falling piece.
///
/// Quitting and confirming are handled by whatever drives the game and never
/// reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    /// One step down; locks the piece if it cannot move.
    SoftDrop,
    RotateClockwise,
    RotateCounterClockwise,
}
