use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub(crate) use self::{
    block_display::*, board_display::*, game_display::*, game_stats_display::*, help_line::*,
    piece_display::*,
};

mod block_display;
mod board_display;
mod game_display;
mod game_stats_display;
mod help_line;
mod piece_display;

pub(crate) mod color {
    use ratatui::style::Color;

    pub(crate) const CYAN: Color = Color::Rgb(0, 255, 255);
    pub(crate) const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub(crate) const PURPLE: Color = Color::Rgb(160, 0, 240);
    pub(crate) const GREEN: Color = Color::Rgb(0, 255, 0);
    pub(crate) const RED: Color = Color::Rgb(255, 0, 0);
    pub(crate) const BLUE: Color = Color::Rgb(0, 0, 255);
    pub(crate) const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub(crate) const GRAY: Color = Color::Rgb(127, 127, 127);
    pub(crate) const DARK_GRAY: Color = Color::Rgb(80, 80, 80);
    pub(crate) const BLACK: Color = Color::Rgb(0, 0, 0);
    pub(crate) const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub(crate) mod style {
    use ratatui::style::{Color, Modifier, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub(crate) const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub(crate) const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub(crate) const SELECTED: Style = fg_bg(color::BLACK, color::CYAN).add_modifier(Modifier::BOLD);
    pub(crate) const TITLE: Style = fg_bg(color::CYAN, color::BLACK).add_modifier(Modifier::BOLD);
    pub(crate) const GAME_OVER: Style = fg_bg(color::WHITE, color::RED).add_modifier(Modifier::BOLD);

    pub(crate) const EMPTY: Style = bg_only(color::BLACK);
    pub(crate) const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);

    pub(crate) const I_BLOCK: Style = bg_only(color::CYAN);
    pub(crate) const O_BLOCK: Style = bg_only(color::YELLOW);
    pub(crate) const T_BLOCK: Style = bg_only(color::PURPLE);
    pub(crate) const S_BLOCK: Style = bg_only(color::GREEN);
    pub(crate) const Z_BLOCK: Style = bg_only(color::RED);
    pub(crate) const J_BLOCK: Style = bg_only(color::BLUE);
    pub(crate) const L_BLOCK: Style = bg_only(color::ORANGE);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    outer.height - inner.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    outer.width - inner.width
}

/// Converts a cell count into terminal units, saturating on absurd sizes.
fn cell_count(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}
