//! Corridor carving between consecutive room centers.
//!
//! Centers are joined pairwise in acceptance order with an L-shaped walk: the horizontal leg is
//! exhausted before the vertical leg begins. Before each step the cell being left is carved if it
//! is rock or a wall running across the direction of travel. Every other kind is walked over as
//! is, so a wall running along the direction of travel blocks the corridor without stopping the
//! walk. The result is not guaranteed to connect every room.

use tracing::debug;

use crate::{
    grid::{Cell, Grid, OutOfBounds},
    types::Position,
};

/// Axis a corridor walk is currently moving along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Leg {
    /// Moving along a row.
    Horizontal,
    /// Moving along a column.
    Vertical,
}

impl Leg {
    /// Returns whether the carver punches through a cell of this kind on this leg.
    const fn carves(self, cell: Cell) -> bool {
        matches!(
            (self, cell),
            (_, Cell::Rock)
                | (Self::Horizontal, Cell::WallVertical)
                | (Self::Vertical, Cell::WallHorizontal)
        )
    }
}

/// Moves a coordinate one unit towards its target.
const fn approach(from: usize, to: usize) -> usize {
    if to > from {
        from + 1
    } else {
        from - 1
    }
}

/// Walks from one center to the next, carving as it goes, and returns the number of carved cells.
///
/// The destination cell itself is never inspected.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if the walk leaves the grid.
pub fn carve(grid: &mut Grid, from: Position, to: Position) -> Result<usize, OutOfBounds> {
    let mut cursor = from;
    let mut carved = 0;

    while cursor != to {
        let leg = if cursor.x == to.x {
            Leg::Vertical
        } else {
            Leg::Horizontal
        };

        // Reading outside the grid is reported the same way as writing outside it.
        let Some(current) = grid.get(cursor) else {
            return Err(OutOfBounds {
                x: cursor.x,
                y: cursor.y,
                width: grid.width(),
                height: grid.height(),
            });
        };
        if leg.carves(current) {
            grid.set(cursor, Cell::Corridor)?;
            carved += 1;
        }

        match leg {
            Leg::Horizontal => cursor.x = approach(cursor.x, to.x),
            Leg::Vertical => cursor.y = approach(cursor.y, to.y),
        }
    }

    Ok(carved)
}

/// Connects every center to the next one in the given order.
///
/// Only consecutive pairs are joined. A room whose walks are blocked on both sides stays cut off.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if a walk leaves the grid.
pub fn connect(grid: &mut Grid, centers: &[Position]) -> Result<(), OutOfBounds> {
    for pair in centers.windows(2) {
        if let &[from, to] = pair {
            let carved = carve(grid, from, to)?;
            debug!(?from, ?to, carved, "carved corridor");
        }
    }

    Ok(())
}
