use std::{iter, mem};

use crate::BoardSizeError;

use super::piece::{Piece, PieceKind, PiecePosition};

/// A single cell of the board.
///
/// A cell only remembers which kind of piece was locked into it, which is
/// what a renderer needs to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Block {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Locked piece of a specific type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }
}

/// Dimensions of a board, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    width: u16,
    height: u16,
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BoardSize {
    pub const DEFAULT_WIDTH: u16 = 12;
    pub const DEFAULT_HEIGHT: u16 = 22;
    pub const DEFAULT: Self = Self {
        width: Self::DEFAULT_WIDTH,
        height: Self::DEFAULT_HEIGHT,
    };

    /// Narrowest board a piece can spawn on (`width / 2 - 2` must not be negative).
    pub const MIN_WIDTH: u16 = 4;
    /// Shallowest board every kind fits on in its spawn orientation.
    pub const MIN_HEIGHT: u16 = 2;
    pub const MAX_WIDTH: u16 = 256;
    pub const MAX_HEIGHT: u16 = 256;

    pub fn new(width: u16, height: u16) -> Result<Self, BoardSizeError> {
        if width < Self::MIN_WIDTH {
            return Err(BoardSizeError::TooNarrow { width });
        }
        if height < Self::MIN_HEIGHT {
            return Err(BoardSizeError::TooShort { height });
        }
        if width > Self::MAX_WIDTH {
            return Err(BoardSizeError::TooWide { width });
        }
        if height > Self::MAX_HEIGHT {
            return Err(BoardSizeError::TooTall { height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(self) -> usize {
        usize::from(self.height)
    }

    /// Origin at which new pieces appear: `(width / 2 - 2, 0)`.
    #[must_use]
    pub fn spawn_position(self) -> PiecePosition {
        PiecePosition::new(i32::from(self.width / 2) - 2, 0)
    }

    /// Converts a signed cell coordinate into grid indices, if it lies on the board.
    fn index(self, (x, y): (i32, i32)) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.width())?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.height())?;
        Some((x, y))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockRow {
    cells: Box<[Block]>,
}

impl BlockRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Block::Empty; width].into_boxed_slice(),
        }
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }
}

/// Grid of locked blocks.
///
/// Row 0 is the top of the board. The grid never changes size; clearing lines
/// shifts the remaining rows down and refills the top with empty rows.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, BoardSize};
///
/// let board = Board::new(BoardSize::DEFAULT);
///
/// // Cells above the board are free, walls and the floor are not.
/// assert!(!board.is_blocked([(4, -1), (5, -1), (6, 0), (7, 0)]));
/// assert!(board.is_blocked([(-1, 3)]));
/// assert!(board.is_blocked([(3, 22)]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    rows: Vec<BlockRow>,
}

impl Board {
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            rows: vec![BlockRow::empty(size.width()); size.height()],
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the block at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn block_at(&self, x: usize, y: usize) -> Option<Block> {
        self.rows.get(y)?.cells.get(x).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.rows.iter().map(|row| &*row.cells)
    }

    /// Returns `true` if any of `cells` is outside the walls, below the floor, or
    /// on an occupied block.
    ///
    /// Cells above the board (`y < 0`) are never checked against the grid, so a
    /// piece may overhang the top edge.
    #[must_use]
    pub fn is_blocked(&self, cells: impl IntoIterator<Item = (i32, i32)>) -> bool {
        let columns = 0..i32::from(self.size.width);
        cells.into_iter().any(|(x, y)| {
            if y < 0 {
                return !columns.contains(&x);
            }
            self.size
                .index((x, y))
                .is_none_or(|(x, y)| !self.rows[y].cells[x].is_empty())
        })
    }

    /// Writes the piece's kind into every cell it covers on the board.
    ///
    /// Cells above the board are dropped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for cell in piece.cells() {
            if let Some((x, y)) = self.size.index(cell) {
                self.rows[y].cells[x] = Block::Piece(piece.kind());
            }
        }
    }

    /// Sets a single cell. Coordinates outside the grid are ignored.
    pub fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x)) {
            *cell = block;
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Remaining rows keep their relative order and the same number of empty
    /// rows is inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let kept: Vec<BlockRow> = mem::take(&mut self.rows)
            .into_iter()
            .filter(|row| !row.is_filled())
            .collect();
        let count = self.size.height() - kept.len();
        let empty = BlockRow::empty(self.size.width());
        self.rows = iter::repeat_n(empty, count).chain(kept).collect();
        count
    }

    /// Creates a `Board` from ASCII art for testing.
    ///
    /// Each line is one row, top to bottom. `.` is an empty cell and a piece
    /// letter (`I`, `O`, `T`, `S`, `Z`, `J`, `L`) is a block of that kind. The
    /// board takes its width from the lines and its height from the line count.
    ///
    /// # Panics
    ///
    /// Panics on unknown characters, ragged rows, or a size below the minimum.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = lines.first().map_or(0, |line| line.chars().count());
        let size = BoardSize::new(
            u16::try_from(width).unwrap(),
            u16::try_from(lines.len()).unwrap(),
        )
        .unwrap();

        let mut board = Self::new(size);
        for (y, line) in lines.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                width,
                "Each row must have exactly {width} cells, got {line:?} at row {y}"
            );
            for (x, ch) in line.chars().enumerate() {
                let block = match ch {
                    '.' => Block::Empty,
                    c => Block::Piece(
                        PieceKind::from_char(c)
                            .unwrap_or_else(|| panic!("invalid cell {c:?} at ({x}, {y})")),
                    ),
                };
                board.rows[y].cells[x] = block;
            }
        }
        board
    }
}
