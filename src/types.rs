//! Shared value types for positions, movement directions and player commands.

/// Grid coordinate.
///
/// This structure holds a column (`x`) and row (`y`) pair addressing a single cell of a
/// [`Grid`](crate::grid::Grid), with the origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Column index, growing to the right.
    pub x: usize,
    /// Row index, growing downwards.
    pub y: usize,
}

impl Position {
    /// Builds a new position from a column and a row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position one step away in the given direction.
    ///
    /// This function only guards against underflow past the top or left edge of the coordinate
    /// space; checking the far edges is left to the grid, which knows its own extent.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self { x, y })
    }
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Away from row zero.
    Down,
    /// Towards column zero.
    Left,
    /// Away from column zero.
    Right,
}

impl Direction {
    /// Returns the `(dx, dy)` offset of a single step in this direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Discrete input events accepted by a traversal session.
///
/// This enumeration is what the key handling layer translates raw terminal events into. Any key
/// without a meaning in the game maps to [`Command::Other`], which the session ignores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor a single cell.
    Move(Direction),
    /// End the session.
    Quit,
    /// Any input without a meaning in the game.
    Other,
}
