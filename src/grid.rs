//! Grid and cell model.
//!
//! This module contains the [`Grid`] struct, the fixed-size board every other part of the crate
//! reads from and writes to, along with the closed set of [`Cell`] kinds that may occupy it.

use std::fmt;

use thiserror::Error;

use crate::types::Position;

/// Kind of a single grid cell.
///
/// Exactly one kind occupies each grid position at any time. There is no layering: writing a cell
/// replaces whatever was there before.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Unexcavated rock.
    #[default]
    Rock,
    /// Walkable room floor.
    FloorInterior,
    /// Top or bottom wall of a room.
    WallHorizontal,
    /// Left or right wall of a room.
    WallVertical,
    /// Carved corridor, including doors punched through walls.
    Corridor,
    /// Uncollected treasure on a room floor.
    Treasure,
    /// A single digit of a room's number label.
    RoomLabelDigit(char),
}

impl Cell {
    /// Returns whether the player may step onto a cell of this kind.
    ///
    /// Label digits sit on what used to be floor but are not traversable.
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Corridor | Self::FloorInterior | Self::Treasure)
    }

    /// Returns the cell drawn with the given character.
    ///
    /// Characters without a dedicated kind are read as label digits.
    pub const fn from_symbol(symbol: char) -> Self {
        match symbol {
            '#' => Self::Rock,
            '.' => Self::FloorInterior,
            '_' => Self::WallHorizontal,
            '|' => Self::WallVertical,
            '*' => Self::Corridor,
            '$' => Self::Treasure,
            digit => Self::RoomLabelDigit(digit),
        }
    }

    /// Returns the character this cell is drawn with.
    pub const fn symbol(self) -> char {
        match self {
            Self::Rock => '#',
            Self::FloorInterior => '.',
            Self::WallHorizontal => '_',
            Self::WallVertical => '|',
            Self::Corridor => '*',
            Self::Treasure => '$',
            Self::RoomLabelDigit(digit) => digit,
        }
    }
}

/// Attempted access outside the grid's extent.
///
/// Callers are expected to check bounds before indexing, so this error signals a broken contract
/// rather than a condition to recover from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cell ({x}, {y}) lies outside the {width}x{height} grid")]
pub struct OutOfBounds {
    /// Requested column.
    pub x: usize,
    /// Requested row.
    pub y: usize,
    /// Width of the grid that was accessed.
    pub width: usize,
    /// Height of the grid that was accessed.
    pub height: usize,
}

/// Fixed `width × height` board of cells stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell storage of length `width * height`.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a new grid with every cell set to [`Cell::Rock`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Rock; width * height],
        }
    }

    /// Returns the number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the position addresses a cell of this grid.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Maps a position onto its storage index, if it lies inside the grid.
    const fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    /// Returns the cell at the given position, or `None` if it lies outside the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Returns a mutable reference to the cell at the given position, or `None` if it lies outside
    /// the grid.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).and_then(|idx| self.cells.get_mut(idx))
    }

    /// Overwrites the cell at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the position lies outside the grid; the grid is left untouched.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), OutOfBounds> {
        let err = OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        };
        let slot = self.get_mut(pos).ok_or(err)?;
        *slot = cell;

        Ok(())
    }

    /// Returns an iterator over the grid rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `chunks` panics on a zero chunk size; an empty grid has no rows either way.
        self.cells.chunks(self.width.max(1))
    }

    /// Returns every position holding the given cell kind, in row-major order.
    pub fn positions_of(&self, kind: Cell) -> Vec<Position> {
        self.rows()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |&(_, cell)| *cell == kind)
                    .map(move |(x, _)| Position::new(x, y))
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(formatter, "{}", cell.symbol())?;
            }
            writeln!(formatter)?;
        }

        Ok(())
    }
}

/// Builds a grid from rows of cell symbols, the inverse of the grid's `Display`.
#[cfg(test)]
pub(crate) fn from_rows(rows: &[&str]) -> Grid {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.chars().count());
    let mut grid = Grid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, symbol) in row.chars().enumerate() {
            grid.set(Position::new(x, y), Cell::from_symbol(symbol))
                .expect("parsed cell should fit the grid");
        }
    }
    grid
}
