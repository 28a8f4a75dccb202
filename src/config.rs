//! Command-line configuration.
//!
//! Everything here is fixed once at startup. The generation parameters are handed over to
//! [`DungeonConfig`] and validated before any grid is built.

use std::path::PathBuf;

use clap::Parser;

use crate::{
    generator::{DungeonConfig, GenerationError},
    types::Position,
};

/// Procedurally generated dungeon explorer for the terminal.
#[derive(Clone, Debug, Parser)]
#[command(name = "cryptuine", version, about, long_about = None)]
pub struct Config {
    /// Grid columns.
    #[arg(long, default_value_t = 50)]
    pub width: usize,
    /// Grid rows.
    #[arg(long, default_value_t = 20)]
    pub height: usize,
    /// Smallest room side, walls included.
    #[arg(long, default_value_t = 4)]
    pub min_room_size: usize,
    /// Largest room side, walls included.
    #[arg(long, default_value_t = 7)]
    pub max_room_size: usize,
    /// Number of rooms to place.
    #[arg(long, default_value_t = 10)]
    pub rooms: usize,
    /// Candidate rooms to draw before giving up on placement.
    #[arg(long, default_value_t = 100_000)]
    pub max_attempts: usize,
    /// Seed for the dungeon layout; a random one is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Requested start column.
    #[arg(long, default_value_t = 1)]
    pub start_x: usize,
    /// Requested start row.
    #[arg(long, default_value_t = 1)]
    pub start_y: usize,
    /// Print the generated map to stdout and exit instead of exploring it.
    #[arg(long)]
    pub print: bool,
    /// File to write logs to; logging is off when omitted.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Returns the generation parameters.
    pub const fn dungeon(&self) -> DungeonConfig {
        DungeonConfig {
            width: self.width,
            height: self.height,
            min_room_size: self.min_room_size,
            max_room_size: self.max_room_size,
            target_room_count: self.rooms,
            max_attempts: self.max_attempts,
        }
    }

    /// Returns the requested start position.
    pub const fn start(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }

    /// Checks the generation parameters and the start position.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfiguration`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.dungeon().validate()?;

        if self.start_x >= self.width || self.start_y >= self.height {
            return Err(GenerationError::InvalidConfiguration {
                reason: format!(
                    "start ({}, {}) lies outside the {}x{} grid",
                    self.start_x, self.start_y, self.width, self.height
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses the given arguments after the binary name.
    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("cryptuine").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_defaults_match_reference_layout() {
        let config = parse(&[]);

        assert_eq!(config.dungeon(), DungeonConfig::default());
        assert_eq!(config.start(), Position::new(1, 1));
        assert_eq!(config.seed, None);
        assert!(!config.print);
        assert_eq!(config.log_file, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--width",
            "80",
            "--height",
            "30",
            "--rooms",
            "12",
            "--seed",
            "99",
            "--start-x",
            "4",
            "--start-y",
            "6",
            "--print",
        ]);

        assert_eq!(config.dungeon().width, 80);
        assert_eq!(config.dungeon().height, 30);
        assert_eq!(config.dungeon().target_room_count, 12);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.start(), Position::new(4, 6));
        assert!(config.print);
    }

    #[test]
    fn test_start_outside_grid_is_invalid() {
        let config = parse(&["--start-x", "50"]);

        assert!(matches!(
            config.validate(),
            Err(GenerationError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_invalid_dungeon_is_reported() {
        let config = parse(&["--min-room-size", "8", "--max-room-size", "5"]);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_numeric_size() {
        let result = Config::try_parse_from(["cryptuine", "--width", "wide"]);

        assert!(result.is_err(), "a non-numeric width should not parse");
    }
}
