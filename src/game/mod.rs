//! Chess board client logic
//!
//! Everything between a pointer gesture and a confirmed move on the grid:
//!
//! - [`types`] - Squares, pieces and move requests
//! - [`notation`] - Square and move notation
//! - [`rules`] - The board grid and special-move classification
//! - [`resources`] - Selection, promotion gate, history and the session
//! - [`systems`] - The move attempt pipeline and board projection
//! - [`view_mode`] - Board orientation for rendering
//!
//! No chess legality lives here. The remote authority decides which moves
//! are legal; this module only infers what a move is meant to be and draws
//! the confirmed result.

pub mod error;
pub mod notation;
pub mod resources;
pub mod rules;
pub mod systems;
pub mod types;
pub mod view_mode;

pub use error::{GameError, GameResult};
pub use types::*;
