use blockfall_engine::{Block, PieceKind, PieceRotation};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// Preview of a piece kind in its spawn orientation.
#[derive(Debug)]
pub(crate) struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub(crate) fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub(crate) fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        4 * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        2 * BlockDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Cells of `kind` in spawn orientation, shifted so the shape starts at
/// `(0, 0)`, together with the shape's width and height.
fn spawn_shape(kind: PieceKind) -> ((usize, usize), [(usize, usize); 4]) {
    let offsets = *kind.offsets(PieceRotation::SPAWN);
    let min_x = offsets.iter().map(|(x, _)| *x).min().unwrap_or(0);
    let min_y = offsets.iter().map(|(_, y)| *y).min().unwrap_or(0);
    let cells = offsets.map(|(x, y)| {
        (
            usize::try_from(x - min_x).unwrap_or(0),
            usize::try_from(y - min_y).unwrap_or(0),
        )
    });
    let width = cells.iter().map(|(x, _)| x + 1).max().unwrap_or(0);
    let height = cells.iter().map(|(_, y)| y + 1).max().unwrap_or(0);
    ((width, height), cells)
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty = BlockDisplay::from_block(Block::Empty, false);
        let Some(kind) = self.piece else {
            empty.render(area, buf);
            return;
        };

        let ((width, height), cells) = spawn_shape(kind);
        let shape_area = area.centered(
            Constraint::Length(super::cell_count(width) * BlockDisplay::WIDTH),
            Constraint::Length(super::cell_count(height) * BlockDisplay::HEIGHT),
        );
        let horizontal =
            Layout::horizontal((0..width).map(|_| Constraint::Length(BlockDisplay::WIDTH)))
                .flex(Flex::Center);
        let vertical = Layout::vertical((0..height).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));

        let occupied = BlockDisplay::from_kind(kind);
        let grid_rows = shape_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                let display = if cells.contains(&(x, y)) { &occupied } else { &empty };
                display.render(grid_cell, buf);
            }
        }
    }
}
