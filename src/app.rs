//! Core application state and logic for the dungeon explorer.

use std::io;

use color_eyre::eyre::Result;
use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    config::Config,
    events,
    explore::{StepOutcome, TraversalSession},
    generator,
    types::Command,
    ui::{self, Ansi},
};

/// Message shown after stepping onto treasure.
pub(crate) const TREASURE_MESSAGE: &str = "Found treasure!";

/// Application state container for the dungeon explorer.
///
/// This structure holds the state Ratatui renders from and Crossterm events write to. The
/// dungeon itself lives inside the traversal session.
pub struct App {
    /// Traversal session over the generated dungeon.
    ///
    /// This field owns the grid for the whole run, along with the cursor and the treasure count.
    /// The application exits once the session is terminated.
    pub(crate) session: TraversalSession,
    /// Seed the dungeon was generated from.
    pub(crate) seed: u64,
    /// Message shown in the status bar, if any.
    ///
    /// It is set when treasure is found and cleared on the next successful move.
    pub(crate) message: Option<&'static str>,
}

impl App {
    /// Generates a dungeon from the configuration and starts exploring it.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The configuration is invalid
    /// - Room placement runs out of attempts
    pub fn new(config: &Config) -> Result<Self> {
        let (session, seed) = explore(config)?;

        Ok(Self {
            session,
            seed,
            message: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues
    /// until the player quits, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.session.is_terminated() {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Forwards a command to the session and updates the status message.
    pub(crate) fn apply(&mut self, command: Command) {
        match self.session.apply(command) {
            StepOutcome::TreasureFound => self.message = Some(TREASURE_MESSAGE),
            StepOutcome::Moved => self.message = None,
            StepOutcome::Rejected | StepOutcome::Quit | StepOutcome::Ignored => {}
        }
    }

    /// Returns the number of treasures collected so far.
    pub const fn treasure_found(&self) -> usize {
        self.session.treasure_found()
    }

    /// Returns the seed the dungeon was generated from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

/// Generates a dungeon and prints it to standard output instead of exploring it.
///
/// The start cell the player would have been placed on is marked like the in-game cursor.
///
/// # Errors
///
/// This function may return errors if:
/// - The configuration is invalid
/// - Room placement runs out of attempts
pub fn print(config: &Config) -> Result<()> {
    let (session, seed) = explore(config)?;

    print!("{}", Ansi::new(session.grid(), Some(session.cursor())));
    println!("seed: {seed}");

    Ok(())
}

/// Validates the configuration, generates the dungeon, and opens a session on it.
fn explore(config: &Config) -> Result<(TraversalSession, u64)> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "generating dungeon");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dungeon = generator::generate(&config.dungeon(), &mut rng)?;
    let session = TraversalSession::new(dungeon.grid, config.start())?;

    Ok((session, seed))
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::{
        explore::SessionState,
        grid::from_rows,
        types::{Direction, Position},
    };

    /// Builds an app over the parsed grid, starting at the given position.
    fn create_test_app(rows: &[&str], x: usize, y: usize) -> App {
        let session = TraversalSession::new(from_rows(rows), Position::new(x, y))
            .expect("start position should be inside the grid");
        App {
            session,
            seed: 7,
            message: None,
        }
    }

    #[test]
    fn test_new_generates_from_seed() {
        let config = Config::try_parse_from([
            "cryptuine", "--width", "80", "--height", "40", "--seed", "42",
        ])
        .expect("arguments should parse");

        let first = App::new(&config).expect("roomy configuration should generate");
        let second = App::new(&config).expect("roomy configuration should generate");

        assert_eq!(first.seed(), 42);
        assert_eq!(first.session.grid(), second.session.grid());
        assert_eq!(first.session.cursor(), second.session.cursor());
        assert_eq!(first.session.state(), SessionState::Active);
    }

    #[test]
    fn test_new_rejects_invalid_configuration() {
        let config = Config::try_parse_from(["cryptuine", "--width", "5"])
            .expect("arguments should parse");

        assert!(App::new(&config).is_err(), "a 5-wide grid cannot fit rooms");
    }

    #[test]
    fn test_treasure_message_lifecycle() {
        let mut app = create_test_app(&[".$.."], 0, 0);

        app.apply(Command::Move(Direction::Right));
        assert_eq!(app.message, Some(TREASURE_MESSAGE));
        assert_eq!(app.treasure_found(), 1);

        // A rejected move keeps the message around.
        app.apply(Command::Move(Direction::Up));
        assert_eq!(app.message, Some(TREASURE_MESSAGE));

        app.apply(Command::Move(Direction::Right));
        assert_eq!(app.message, None);
    }

    #[test]
    fn test_quit_ends_session() {
        let mut app = create_test_app(&["*."], 0, 0);

        app.apply(Command::Quit);

        assert!(app.session.is_terminated());
    }
}
