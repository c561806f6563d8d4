//! UI module - text front end
//!
//! - **terminal**: Renders the board view and history, parses commands and
//!   answers promotion prompts from stdin
//!
//! The UI never edits game state directly. It reads
//! [`crate::game::view_mode::BoardView`] and drives
//! [`crate::game::systems::InputHandle`].

pub mod terminal;

pub use terminal::{parse_command, render_board, render_history, Command, CommandError};
