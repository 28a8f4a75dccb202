//! Procedural dungeon generation and single-player exploration.
//!
//! A dungeon is generated in four passes over a fixed-size [`grid::Grid`]: rooms are placed at
//! random without touching each other, renumbered top to bottom and left to right, and joined in
//! placement order by L-shaped corridors. The result is explored one key press at a time through a
//! [`explore::TraversalSession`], either in the terminal user interface or printed once with
//! [`print`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
pub mod corridor;
mod events;
pub mod explore;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod numbering;
pub mod room;
pub mod types;
mod ui;

pub use app::{print, App};
pub use config::Config;
