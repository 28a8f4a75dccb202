//! Event handling functions for user input.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    types::{Command, Direction},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and forwards the command each key press maps to. It
/// uses a timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.apply(command_for(key.code));
            }
        }
    }

    Ok(())
}

/// Maps a key to the command it issues.
///
/// The `wasd` keys, the arrow keys, and the `hjkl` keys all move the cursor. `q` and `Esc` quit.
pub(crate) const fn command_for(code: KeyCode) -> Command {
    match code {
        KeyCode::Char('w' | 'k') | KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Char('s' | 'j') | KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Char('a' | 'h') | KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Char('d' | 'l') | KeyCode::Right => Command::Move(Direction::Right),
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => Command::Other,
    }
}
