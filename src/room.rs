//! Room records, stamping and rejection-sampled placement.
//!
//! Placement draws candidate rectangles until the configured number of rooms has been accepted
//! or the attempt budget runs out. A candidate is rejected when the rectangle grown by one cell on
//! every side touches anything other than rock, so accepted rooms always keep a rock buffer
//! between them.

use rand::Rng;
use tracing::debug;

use crate::{
    generator::{DungeonConfig, GenerationError},
    grid::{Cell, Grid, OutOfBounds},
    types::Position,
};

/// Placement record of a single room.
///
/// Rooms only live as long as generation does; what persists is the cells they stamped onto the
/// grid and their center, which the corridor carver connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    /// Column of the top-left corner.
    pub x: usize,
    /// Row of the top-left corner.
    pub y: usize,
    /// Number of columns, walls included.
    pub width: usize,
    /// Number of rows, walls included.
    pub height: usize,
    /// Label drawn inside the top-left corner.
    pub number: usize,
}

impl Room {
    /// Returns the integer midpoint of the room.
    pub const fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Returns the position of the first label digit, just inside the top-left corner.
    pub const fn label_origin(&self) -> Position {
        Position::new(self.x + 1, self.y + 1)
    }

    /// Returns whether the position lies on the room's walls or inside them.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }
}

/// Returns whether a candidate rectangle collides with anything already on the grid.
///
/// The scanned area is the rectangle grown by one cell on every side. Any scanned cell that falls
/// outside the grid or is not rock counts as a collision.
pub fn overlaps(grid: &Grid, x: usize, y: usize, width: usize, height: usize) -> bool {
    let (Some(left), Some(top)) = (x.checked_sub(1), y.checked_sub(1)) else {
        return true;
    };

    (top..=y + height).any(|row| {
        (left..=x + width).any(|col| grid.get(Position::new(col, row)) != Some(Cell::Rock))
    })
}

/// Stamps the deterministic geometry of a room: walls on the border and floor inside.
///
/// The top and bottom rows become horizontal walls, including the corners. The remaining cells of
/// the left and right columns become vertical walls.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if any part of the room lies outside the grid.
pub fn stamp_geometry(grid: &mut Grid, room: &Room) -> Result<(), OutOfBounds> {
    for row in room.y..room.y + room.height {
        for col in room.x..room.x + room.width {
            let cell = if row == room.y || row == room.y + room.height - 1 {
                Cell::WallHorizontal
            } else if col == room.x || col == room.x + room.width - 1 {
                Cell::WallVertical
            } else {
                Cell::FloorInterior
            };
            grid.set(Position::new(col, row), cell)?;
        }
    }

    Ok(())
}

/// Drops between zero and two treasures on random interior cells of the room.
///
/// Two draws may land on the same cell, in which case the room ends up with a single treasure.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if a drawn cell lies outside the grid.
pub fn scatter_treasure<R: Rng + ?Sized>(
    grid: &mut Grid,
    room: &Room,
    rng: &mut R,
) -> Result<(), OutOfBounds> {
    let count = rng.gen_range(0..=2);
    for _ in 0..count {
        let tx = rng.gen_range(room.x + 1..=room.x + room.width - 2);
        let ty = rng.gen_range(room.y + 1..=room.y + room.height - 2);
        grid.set(Position::new(tx, ty), Cell::Treasure)?;
    }

    Ok(())
}

/// Writes the room number as individual digit cells, left to right from the label origin.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if the label runs past the edge of the grid.
pub fn stamp_label(grid: &mut Grid, room: &Room) -> Result<(), OutOfBounds> {
    let origin = room.label_origin();
    for (offset, digit) in room.number.to_string().chars().enumerate() {
        grid.set(
            Position::new(origin.x + offset, origin.y),
            Cell::RoomLabelDigit(digit),
        )?;
    }

    Ok(())
}

/// Stamps a complete room: geometry, then treasure, then the label.
///
/// The label goes down last, so a treasure drawn onto a label cell is hidden under the digit.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if any part of the room lies outside the grid.
pub fn stamp<R: Rng + ?Sized>(grid: &mut Grid, room: &Room, rng: &mut R) -> Result<(), OutOfBounds> {
    stamp_geometry(grid, room)?;
    scatter_treasure(grid, room, rng)?;
    stamp_label(grid, room)
}

/// Rejection-samples rooms onto the grid until the target count is accepted.
///
/// Rooms are numbered in acceptance order and returned in that order. Every candidate, accepted
/// or not, counts against the attempt budget of the configuration.
///
/// # Errors
///
/// - [`GenerationError::InvalidConfiguration`] if the configuration is rejected or the grid is too
///   small for its largest room
/// - [`GenerationError::PlacementExhausted`] if the attempt budget runs out first
/// - [`GenerationError::OutOfBounds`] if stamping writes outside the grid, which a validated
///   configuration rules out
pub fn place_rooms<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &DungeonConfig,
    rng: &mut R,
) -> Result<Vec<Room>, GenerationError> {
    config.validate()?;
    // Every candidate origin range below must be non-empty.
    let needed = config.max_room_size + 2;
    if grid.width() < needed || grid.height() < needed {
        return Err(GenerationError::InvalidConfiguration {
            reason: format!(
                "a {}x{} grid cannot hold a room of size {}",
                grid.width(),
                grid.height(),
                config.max_room_size
            ),
        });
    }

    let mut rooms = Vec::with_capacity(config.target_room_count);
    let mut attempts = 0;

    while rooms.len() < config.target_room_count {
        if attempts == config.max_attempts {
            return Err(GenerationError::PlacementExhausted {
                placed: rooms.len(),
                target: config.target_room_count,
                attempts,
            });
        }
        attempts += 1;

        let width = rng.gen_range(config.min_room_size..=config.max_room_size);
        let height = rng.gen_range(config.min_room_size..=config.max_room_size);
        let x = rng.gen_range(1..=grid.width() - width - 1);
        let y = rng.gen_range(1..=grid.height() - height - 1);

        if overlaps(grid, x, y, width, height) {
            continue;
        }

        let room = Room {
            x,
            y,
            width,
            height,
            number: rooms.len() + 1,
        };
        stamp(grid, &room, rng)?;
        debug!(?room, attempts, "accepted room");
        rooms.push(room);
    }

    debug!(
        placed = rooms.len(),
        attempts,
        rejected = attempts - rooms.len(),
        "room placement finished"
    );

    Ok(rooms)
}
