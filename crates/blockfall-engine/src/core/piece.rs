use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// A falling tetromino: kind, rotation state and board-relative origin.
///
/// Pieces are plain values. Movement and rotation return new `Piece` instances
/// so a caller can test the candidate against the board before committing it.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward, Y increases downward
/// - Coordinates are signed: a piece may sit partly above the board (`y < 0`)
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind, PiecePosition, RotationDirection};
///
/// let piece = Piece::new(PieceKind::T, PiecePosition::new(4, 0));
/// let moved = piece.moved(1, 0);
/// let rotated = moved.rotated(RotationDirection::Clockwise);
///
/// assert_eq!(rotated.position(), PiecePosition::new(5, 0));
/// assert_eq!(rotated.rotation().index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece in its spawn orientation (rotation 0) at `position`.
    #[must_use]
    pub const fn new(kind: PieceKind, position: PiecePosition) -> Self {
        Self {
            position,
            rotation: PieceRotation::SPAWN,
            kind,
        }
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the four board cells this piece occupies.
    #[must_use]
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.cells_at(self.rotation, 0, 0)
    }

    /// Returns the cells the piece would occupy with `rotation` and shifted by
    /// `(dx, dy)`, without changing the piece.
    #[must_use]
    pub fn cells_at(&self, rotation: PieceRotation, dx: i32, dy: i32) -> [(i32, i32); 4] {
        let x0 = self.position.x + dx;
        let y0 = self.position.y + dy;
        let offsets = *self.kind.offsets(rotation);
        offsets.map(|(ox, oy)| (x0 + ox, y0 + oy))
    }

    /// Returns the cells of this piece that lie inside the visible rows (`y >= 0`).
    pub fn visible_cells(&self) -> impl Iterator<Item = (i32, i32)> {
        self.cells().into_iter().filter(|&(_, y)| y >= 0)
    }

    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.translated(dx, dy),
            rotation: self.rotation,
            kind: self.kind,
        }
    }

    #[must_use]
    pub const fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            position: self.position,
            rotation: self.rotation.rotated(direction),
            kind: self.kind,
        }
    }
}

/// Origin of a piece on the board.
///
/// The origin is the top-left corner of the piece's offset table, not
/// necessarily an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Direction of a single rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation state of a piece.
///
/// Represents one of four rotation states, `0` being the spawn orientation.
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    /// Creates a rotation state from any index, reduced modulo 4.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % 4)
    }

    #[must_use]
    pub const fn rotated(self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => Self((self.0 + 1) % 4),
            RotationDirection::CounterClockwise => Self((self.0 + 3) % 4),
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the fixed cell offsets of this kind in the given rotation state.
    #[must_use]
    pub fn offsets(self, rotation: PieceRotation) -> &'static [(i32, i32); 4] {
        &PIECE_OFFSETS[self as usize][rotation.index()]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Cell offsets of one rotation state, relative to the piece origin.
type PieceOffsets = [(i32, i32); 4];

/// Offset tables for every kind and rotation state.
///
/// The states are literal tables rather than rotations of a base shape, so each
/// kind keeps its own pivot: the O-piece never moves when rotated, and the
/// I-piece alternates between rows/columns 1 and 2 of its 4×4 box.
static PIECE_OFFSETS: [[PieceOffsets; 4]; PieceKind::LEN] = [
    // I-piece
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O-piece
    [[(1, 0), (2, 0), (1, 1), (2, 1)]; 4],
    // T-piece
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S-piece
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z-piece
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J-piece
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L-piece
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];
