use blockfall_engine::Game;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, GameStatsDisplay, PieceDisplay, color, style};

/// Board, next-piece preview and statistics of one game.
#[derive(Debug)]
pub(crate) struct GameDisplay<'a> {
    game: &'a Game,
}

impl<'a> GameDisplay<'a> {
    pub(crate) fn new(game: &'a Game) -> Self {
        Self { game }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game_over = self.game.is_game_over();
        let border_color = if game_over { color::RED } else { color::WHITE };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_color)
                .style(style::DEFAULT)
        };

        let board = BoardDisplay::new(self.game.board())
            .falling_piece(*self.game.current_piece())
            .block(Block::bordered().border_style(border_color).style(style::DEFAULT));
        let (next_kind, _) = self.game.next_preview();
        let next = PieceDisplay::new().piece(next_kind).block(panel("NEXT"));
        let stats = GameStatsDisplay::new(self.game.stats()).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(next.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [next_area] = Layout::vertical([Constraint::Length(next.height())]).areas(right_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        next.render(next_area, buf);

        if game_over {
            let banner = Block::new().style(style::GAME_OVER);
            let text = Text::styled("GAME OVER", style::GAME_OVER).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = banner.inner(area);
            Clear.render(area, buf);
            banner.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
