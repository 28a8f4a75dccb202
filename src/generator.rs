//! Dungeon generation pipeline.
//!
//! This module contains the generation configuration, the errors generation may surface, and the
//! [`generate`] function tying room placement, renumbering and corridor carving together into a
//! finished [`Grid`]. A grid is only ever handed back once every step has succeeded.

use std::time::Instant;

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::{
    corridor,
    grid::{Grid, OutOfBounds},
    numbering,
    room::{self, Room},
    types::Position,
};

/// Failures that abort dungeon generation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The configuration violates one of its constraints.
    #[error("invalid dungeon configuration: {reason}")]
    InvalidConfiguration {
        /// Human readable description of the violated constraint.
        reason: String,
    },
    /// The attempt budget ran out before every room was placed.
    #[error("placed only {placed} of {target} rooms in {attempts} attempts")]
    PlacementExhausted {
        /// Rooms accepted before giving up.
        placed: usize,
        /// Rooms requested.
        target: usize,
        /// Candidates drawn, accepted ones included.
        attempts: usize,
    },
    /// A grid access fell outside the grid.
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
}

/// Parameters fixed at the start of generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DungeonConfig {
    /// Grid columns.
    pub width: usize,
    /// Grid rows.
    pub height: usize,
    /// Smallest room side, walls included.
    pub min_room_size: usize,
    /// Largest room side, walls included.
    pub max_room_size: usize,
    /// Number of rooms to place.
    pub target_room_count: usize,
    /// Candidate rooms to draw before giving up.
    pub max_attempts: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 20,
            min_room_size: 4,
            max_room_size: 7,
            target_room_count: 10,
            max_attempts: 100_000,
        }
    }
}

impl DungeonConfig {
    /// Smallest room side that still leaves a floor cell inside the walls.
    pub const MIN_ROOM_SIZE: usize = 3;

    /// Largest grid side, bounded by the terminal's `u16` cell coordinates.
    pub const MAX_GRID_SIDE: usize = 65_535;

    /// Checks the configuration constraints.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfiguration`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |reason: String| Err(GenerationError::InvalidConfiguration { reason });

        if self.min_room_size < Self::MIN_ROOM_SIZE {
            return invalid(format!(
                "minimum room size {} is below {}",
                self.min_room_size,
                Self::MIN_ROOM_SIZE
            ));
        }
        if self.max_room_size < self.min_room_size {
            return invalid(format!(
                "maximum room size {} is below minimum room size {}",
                self.max_room_size, self.min_room_size
            ));
        }
        if self.width > Self::MAX_GRID_SIDE || self.height > Self::MAX_GRID_SIDE {
            return invalid(format!(
                "a {}x{} grid exceeds the largest drawable side of {}",
                self.width,
                self.height,
                Self::MAX_GRID_SIDE
            ));
        }
        // A room of the largest size needs one cell of margin on either side.
        let needed = self.max_room_size.saturating_add(2);
        if self.width < needed || self.height < needed {
            return invalid(format!(
                "a {}x{} grid cannot hold a room of size {}",
                self.width, self.height, self.max_room_size
            ));
        }
        let label_width = self.target_room_count.to_string().len();
        if label_width > self.min_room_size - 2 {
            return invalid(format!(
                "room label {} does not fit inside a room of size {}",
                self.target_room_count, self.min_room_size
            ));
        }
        let footprint = (self.min_room_size + 1)
            .saturating_mul(self.min_room_size + 1)
            .saturating_mul(self.target_room_count);
        let usable = (self.width - 1).checked_mul(self.height - 1);
        if usable.is_none_or(|usable| footprint > usable) {
            return invalid(format!(
                "{} rooms of size {} cannot fit a {}x{} grid",
                self.target_room_count, self.min_room_size, self.width, self.height
            ));
        }
        if self.max_attempts == 0 {
            return invalid("attempt budget must be positive".to_owned());
        }

        Ok(())
    }
}

/// Output of a successful generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    /// The finished grid.
    pub grid: Grid,
    /// Rooms in numbering order, top-to-bottom then left-to-right.
    pub rooms: Vec<Room>,
    /// Room centers in acceptance order, the order the corridors were carved in.
    pub centers: Vec<Position>,
}

/// Generates a complete dungeon.
///
/// The configuration is validated first. Rooms are then placed, renumbered by position, and joined
/// by corridors between consecutive centers in the order they were accepted.
///
/// # Errors
///
/// - [`GenerationError::InvalidConfiguration`] if the configuration is rejected
/// - [`GenerationError::PlacementExhausted`] if the rooms do not fit within the attempt budget
/// - [`GenerationError::OutOfBounds`] if a step writes outside the grid
pub fn generate<R: Rng + ?Sized>(
    config: &DungeonConfig,
    rng: &mut R,
) -> Result<Dungeon, GenerationError> {
    config.validate()?;

    let started = Instant::now();
    let mut grid = Grid::new(config.width, config.height);

    let placed = room::place_rooms(&mut grid, config, rng)?;
    let centers: Vec<Position> = placed.iter().map(Room::center).collect();
    let rooms = numbering::renumber(&mut grid, placed, rng)?;
    corridor::connect(&mut grid, &centers)?;

    info!(
        width = config.width,
        height = config.height,
        rooms = rooms.len(),
        elapsed = ?started.elapsed(),
        "generated dungeon"
    );

    Ok(Dungeon {
        grid,
        rooms,
        centers,
    })
}
