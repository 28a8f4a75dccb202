//! User interface rendering for the exploration screen and the printed map.

use std::fmt;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    crossterm::style::{self as term, Stylize as _},
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    grid::{Cell, Grid},
    types::Position,
    App,
};

/// Symbol drawn at the player's position.
const CURSOR: char = '+';

/// Key help shown in the status bar.
const HELP: &str = "(w/a/s/d) move / (q) quit";

/// Renders the dungeon with the player cursor and a status bar underneath.
///
/// The map is centered in the area above the status bar. Maps larger than the terminal are
/// clipped on the right and bottom.
///
/// # Errors
///
/// This function may return errors from data conversion failures or layout retrieval.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    frame.render_widget(Clear, frame.area());

    let grid = app.session.grid();
    let columns = u16::try_from(grid.width())?;
    let rows = u16::try_from(grid.height())?;

    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    let map_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get map content area from layout")?;
    let status_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    let map_rows = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(rows),
        Constraint::Min(0),
    ])
    .split(map_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get map rows from layout")?;
    let map_area = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(columns),
        Constraint::Min(0),
    ])
    .split(map_rows)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get map area from horizontal layout")?;

    // The status bar is at least as wide as its key help.
    let status_width = columns.max(u16::try_from(HELP.len())? + 2);
    let status_area = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(status_width),
        Constraint::Min(0),
    ])
    .split(status_full_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered status area from horizontal layout")?;

    let map = Paragraph::new(grid_lines(grid, Some(app.session.cursor())));
    frame.render_widget(map, map_area);

    let status_block = Block::bordered()
        .title(HELP)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status = Paragraph::new(vec![
        Line::from(format!(
            "Treasure: {}  Seed: {}",
            app.treasure_found(),
            app.seed
        )),
        Line::from(app.message.unwrap_or_default()),
    ])
    .alignment(Alignment::Center)
    .block(status_block);
    frame.render_widget(status, status_area);

    Ok(())
}

/// Returns the style a cell kind is rendered with.
pub(crate) fn cell_style(cell: Cell) -> Style {
    let color = match cell {
        Cell::Rock => Color::DarkGray,
        Cell::FloorInterior => Color::White,
        Cell::WallHorizontal | Cell::WallVertical => Color::Yellow,
        Cell::Corridor => Color::Blue,
        Cell::Treasure => Color::LightYellow,
        Cell::RoomLabelDigit(_) => Color::Green,
    };

    Style::default().fg(color)
}

/// Returns the style of the player cursor.
fn cursor_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

/// Converts the grid into styled lines, one per row.
///
/// When a cursor is given, the cell under it is replaced by the cursor symbol.
pub(crate) fn grid_lines(grid: &Grid, cursor: Option<Position>) -> Vec<Line<'static>> {
    grid.rows()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, &cell)| {
                    if cursor == Some(Position::new(x, y)) {
                        Span::styled(CURSOR.to_string(), cursor_style())
                    } else {
                        Span::styled(cell.symbol().to_string(), cell_style(cell))
                    }
                })
                .collect::<Line<'static>>()
        })
        .collect()
}

/// Grid renderer emitting ANSI colored text for plain terminal output.
pub(crate) struct Ansi<'grid> {
    /// Grid to render.
    grid: &'grid Grid,
    /// Position drawn as the cursor, if any.
    cursor: Option<Position>,
}

impl<'grid> Ansi<'grid> {
    /// Wraps a grid for printing.
    pub(crate) const fn new(grid: &'grid Grid, cursor: Option<Position>) -> Self {
        Self { grid, cursor }
    }
}

impl fmt::Display for Ansi<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.grid.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if self.cursor == Some(Position::new(x, y)) {
                    write!(formatter, "{}", CURSOR.red().bold())?;
                    continue;
                }

                let color = match cell {
                    Cell::Rock => term::Color::DarkGrey,
                    Cell::FloorInterior => term::Color::White,
                    Cell::WallHorizontal | Cell::WallVertical => term::Color::DarkYellow,
                    Cell::Corridor => term::Color::Blue,
                    Cell::Treasure => term::Color::Yellow,
                    Cell::RoomLabelDigit(_) => term::Color::Green,
                };
                write!(formatter, "{}", cell.symbol().with(color))?;
            }
            writeln!(formatter)?;
        }

        Ok(())
    }
}
