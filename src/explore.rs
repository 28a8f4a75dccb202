//! Player traversal over a generated grid.
//!
//! A [`TraversalSession`] owns the finished grid for the duration of play. It resolves the start
//! position, applies one [`Command`] at a time, and turns treasure back into floor as it is
//! collected. Invalid moves are rejected silently; traversal itself never fails.

use tracing::{debug, info, warn};

use crate::{
    grid::{Cell, Grid, OutOfBounds},
    types::{Command, Direction, Position},
};

/// Half the side of the square window searched for a start cell.
pub const START_SEARCH_RADIUS: usize = 15;

/// Lifecycle of a traversal session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Commands are being processed.
    Active,
    /// The player quit; further commands are ignored.
    Terminated,
}

/// Result of applying a single command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cursor moved onto a corridor or floor cell.
    Moved,
    /// The cursor moved onto treasure, which has been collected.
    TreasureFound,
    /// The move pointed outside the grid or at a cell that cannot be entered.
    Rejected,
    /// The session ended.
    Quit,
    /// The command has no effect in the current state.
    Ignored,
}

/// Single-player traversal state machine.
#[derive(Clone, Debug)]
pub struct TraversalSession {
    /// Grid being explored, mutated as treasure is collected.
    grid: Grid,
    /// Current player position.
    cursor: Position,
    /// Whether commands are still processed.
    state: SessionState,
    /// Treasures collected so far.
    treasure_found: usize,
}

impl TraversalSession {
    /// Starts a session on the given grid, as close to the requested position as possible.
    ///
    /// See [`resolve_start`] for how the start cell is picked.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the requested position lies outside the grid.
    pub fn new(grid: Grid, requested: Position) -> Result<Self, OutOfBounds> {
        if !grid.contains(requested) {
            return Err(OutOfBounds {
                x: requested.x,
                y: requested.y,
                width: grid.width(),
                height: grid.height(),
            });
        }

        let cursor = resolve_start(&grid, requested);
        debug!(?requested, ?cursor, "resolved start position");

        Ok(Self {
            grid,
            cursor,
            state: SessionState::Active,
            treasure_found: 0,
        })
    }

    /// Returns the grid in its current state.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the current cursor position.
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns the current session state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns whether the player has quit.
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, SessionState::Terminated)
    }

    /// Returns the number of treasures collected so far.
    pub const fn treasure_found(&self) -> usize {
        self.treasure_found
    }

    /// Applies one command and reports what happened.
    pub fn apply(&mut self, command: Command) -> StepOutcome {
        if self.is_terminated() {
            return StepOutcome::Ignored;
        }

        match command {
            Command::Quit => {
                self.state = SessionState::Terminated;
                info!(treasure_found = self.treasure_found, "session terminated");
                StepOutcome::Quit
            }
            Command::Move(direction) => self.step(direction),
            Command::Other => StepOutcome::Ignored,
        }
    }

    /// Moves the cursor a single cell if the neighbour in that direction can be entered.
    fn step(&mut self, direction: Direction) -> StepOutcome {
        let Some(target) = self.cursor.step(direction) else {
            return StepOutcome::Rejected;
        };
        let Some(cell) = self.grid.get_mut(target) else {
            return StepOutcome::Rejected;
        };
        if !cell.is_traversable() {
            return StepOutcome::Rejected;
        }

        self.cursor = target;
        if *cell != Cell::Treasure {
            return StepOutcome::Moved;
        }

        *cell = Cell::FloorInterior;
        self.treasure_found += 1;
        info!(position = ?target, total = self.treasure_found, "found treasure");

        StepOutcome::TreasureFound
    }
}

/// Picks the cell a session starts on.
///
/// The requested cell is used as is when it is a corridor or floor. Otherwise the square window of
/// [`START_SEARCH_RADIUS`] around it, clipped to the grid, is scanned row by row for the first
/// corridor or floor cell. Treasure does not count here. When the window holds no such cell the
/// requested position is kept even though it cannot be entered.
pub fn resolve_start(grid: &Grid, requested: Position) -> Position {
    let startable = |pos: Position| {
        matches!(
            grid.get(pos),
            Some(Cell::Corridor | Cell::FloorInterior)
        )
    };

    if startable(requested) {
        return requested;
    }

    let top = requested.y.saturating_sub(START_SEARCH_RADIUS);
    let bottom = (requested.y + START_SEARCH_RADIUS).min(grid.height().saturating_sub(1));
    let left = requested.x.saturating_sub(START_SEARCH_RADIUS);
    let right = (requested.x + START_SEARCH_RADIUS).min(grid.width().saturating_sub(1));

    let found = (top..=bottom)
        .flat_map(|y| (left..=right).map(move |x| Position::new(x, y)))
        .find(|&pos| startable(pos));

    found.unwrap_or_else(|| {
        warn!(?requested, "no start cell within reach, keeping requested position");
        requested
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        generator::{self, DungeonConfig},
        grid::from_rows,
        room::Room,
    };

    /// Starts a session on the parsed grid at the given position.
    fn session(rows: &[&str], x: usize, y: usize) -> TraversalSession {
        TraversalSession::new(from_rows(rows), Position::new(x, y))
            .expect("start position should be inside the grid")
    }

    #[test]
    fn test_start_on_corridor_is_kept() {
        let walker = session(&["###", "#*#", "###"], 1, 1);

        assert_eq!(walker.cursor(), Position::new(1, 1));
        assert_eq!(walker.state(), SessionState::Active);
    }

    #[test]
    fn test_start_relocates_in_row_major_order() {
        let grid = from_rows(&["#####", "###.#", "#*###", "#####"]);

        // (3, 1) comes before (1, 2) in row-major order.
        assert_eq!(
            resolve_start(&grid, Position::new(0, 0)),
            Position::new(3, 1)
        );
    }

    #[test]
    fn test_start_ignores_treasure() {
        let grid = from_rows(&["$##", "##*"]);

        assert_eq!(
            resolve_start(&grid, Position::new(0, 1)),
            Position::new(2, 1)
        );
    }

    #[test]
    fn test_start_search_is_bounded() {
        let mut grid = Grid::new(40, 3);
        grid.set(Position::new(20, 1), Cell::FloorInterior)
            .expect("position should be inside the grid");

        // 19 columns away: outside the window.
        assert_eq!(
            resolve_start(&grid, Position::new(1, 1)),
            Position::new(1, 1)
        );
        // 15 columns away: on the edge of the window.
        assert_eq!(
            resolve_start(&grid, Position::new(5, 1)),
            Position::new(20, 1)
        );
    }

    #[test]
    fn test_start_outside_grid_is_an_error() {
        let result = TraversalSession::new(Grid::new(3, 3), Position::new(3, 0));

        assert!(result.is_err(), "start outside the grid should be refused");
    }

    #[test]
    fn test_fallback_start_rejects_blocked_moves() {
        let mut walker = session(&["###", "###", "###"], 1, 1);

        assert_eq!(walker.cursor(), Position::new(1, 1));
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(walker.apply(Command::Move(direction)), StepOutcome::Rejected);
            assert_eq!(walker.cursor(), Position::new(1, 1));
        }
    }

    #[test]
    fn test_rock_north_floor_east() {
        let mut walker = session(&["###", "#*.", "###"], 1, 1);

        assert_eq!(
            walker.apply(Command::Move(Direction::Up)),
            StepOutcome::Rejected
        );
        assert_eq!(walker.cursor(), Position::new(1, 1));

        assert_eq!(
            walker.apply(Command::Move(Direction::Right)),
            StepOutcome::Moved
        );
        assert_eq!(walker.cursor(), Position::new(2, 1));
    }

    #[test]
    fn test_walls_and_labels_block() {
        let mut walker = session(&["#_#", "|.1", "###"], 1, 1);

        assert_eq!(
            walker.apply(Command::Move(Direction::Up)),
            StepOutcome::Rejected
        );
        assert_eq!(
            walker.apply(Command::Move(Direction::Left)),
            StepOutcome::Rejected
        );
        assert_eq!(
            walker.apply(Command::Move(Direction::Right)),
            StepOutcome::Rejected
        );
        assert_eq!(walker.cursor(), Position::new(1, 1));
    }

    #[test]
    fn test_edge_of_grid_is_rejected() {
        let mut walker = session(&["*."], 0, 0);

        assert_eq!(
            walker.apply(Command::Move(Direction::Left)),
            StepOutcome::Rejected
        );
        assert_eq!(
            walker.apply(Command::Move(Direction::Up)),
            StepOutcome::Rejected
        );
        assert_eq!(
            walker.apply(Command::Move(Direction::Right)),
            StepOutcome::Moved
        );
        assert_eq!(
            walker.apply(Command::Move(Direction::Right)),
            StepOutcome::Rejected
        );
        assert_eq!(
            walker.apply(Command::Move(Direction::Down)),
            StepOutcome::Rejected
        );
        assert_eq!(walker.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_treasure_is_collected_once() {
        let mut walker = session(&[".$."], 0, 0);

        assert_eq!(
            walker.apply(Command::Move(Direction::Right)),
            StepOutcome::TreasureFound
        );
        assert_eq!(walker.grid().get(Position::new(1, 0)), Some(Cell::FloorInterior));
        assert_eq!(walker.treasure_found(), 1);

        assert_eq!(
            walker.apply(Command::Move(Direction::Right)),
            StepOutcome::Moved
        );
        assert_eq!(
            walker.apply(Command::Move(Direction::Left)),
            StepOutcome::Moved
        );
        assert_eq!(walker.treasure_found(), 1);
    }

    #[test]
    fn test_quit_terminates_and_ignores_later_commands() {
        let mut walker = session(&["*."], 0, 0);

        assert_eq!(walker.apply(Command::Quit), StepOutcome::Quit);
        assert!(walker.is_terminated());
        assert_eq!(
            walker.apply(Command::Move(Direction::Right)),
            StepOutcome::Ignored
        );
        assert_eq!(walker.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_other_input_is_ignored() {
        let mut walker = session(&["*."], 0, 0);

        assert_eq!(walker.apply(Command::Other), StepOutcome::Ignored);
        assert_eq!(walker.cursor(), Position::new(0, 0));
        assert_eq!(walker.state(), SessionState::Active);
    }

    /// Any single directional command.
    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn test_walks_on_generated_dungeons_stay_on_traversable_cells(
            seed in any::<u64>(),
            directions in prop::collection::vec(direction(), 1..300),
        ) {
            let config = DungeonConfig {
                width: 80,
                height: 40,
                ..DungeonConfig::default()
            };
            let dungeon = generator::generate(&config, &mut ChaCha8Rng::seed_from_u64(seed))
                .expect("roomy configuration should generate");
            let start = dungeon
                .rooms
                .first()
                .map_or(Position::new(1, 1), Room::center);
            let treasure = dungeon.grid.positions_of(Cell::Treasure).len();
            let mut walker = TraversalSession::new(dungeon.grid, start)
                .expect("room center should be inside the grid");

            for direction in directions {
                let before = walker.cursor();
                match walker.apply(Command::Move(direction)) {
                    StepOutcome::Moved | StepOutcome::TreasureFound => {
                        let cell = walker.grid().get(walker.cursor());
                        prop_assert!(
                            cell.is_some_and(Cell::is_traversable),
                            "cursor landed on {cell:?}"
                        );
                        prop_assert_ne!(walker.cursor(), before);
                    }
                    outcome => {
                        prop_assert_eq!(outcome, StepOutcome::Rejected);
                        prop_assert_eq!(walker.cursor(), before);
                    }
                }
            }
            prop_assert_eq!(
                walker.grid().positions_of(Cell::Treasure).len() + walker.treasure_found(),
                treasure
            );
        }
    }
}
