//! Positional room renumbering.
//!
//! Placement numbers rooms in the order they were accepted, which reads as noise on screen. This
//! module sorts the rooms top-to-bottom, left-to-right and stamps every room again with its new
//! number.
//!
//! Stamping again also rolls the treasure again, so the treasure a room ends up with comes from
//! this second pass alone. Whatever the first pass dropped is wiped by the fresh floor.

use rand::Rng;

use crate::{
    grid::{Grid, OutOfBounds},
    room::{self, Room},
};

/// Sorts rooms by `(y, x)` and restamps each one with its position in that order as its label.
///
/// The rooms are restamped in sorted order and returned in that order, numbered from one.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if a room does not fit the grid it is stamped onto.
pub fn renumber<R: Rng + ?Sized>(
    grid: &mut Grid,
    mut rooms: Vec<Room>,
    rng: &mut R,
) -> Result<Vec<Room>, OutOfBounds> {
    rooms.sort_by_key(|placed| (placed.y, placed.x));

    for (idx, placed) in rooms.iter_mut().enumerate() {
        placed.number = idx + 1;
        room::stamp(grid, placed, rng)?;
    }

    Ok(rooms)
}
