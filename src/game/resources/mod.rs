//! Game resources - per-session state
//!
//! # Resource Categories
//!
//! ## Player Interaction
//! - [`Selection`] - The armed square, if any
//! - [`PromotionGate`] - Suspends a move until a promotion piece is picked
//!
//! ## Game History
//! - [`MoveHistory`] - Confirmed moves, paired into numbered rows
//!
//! ## Session
//! - [`GameSession`] - Owns the board, selection, history and orientation
//!   and resets them together

pub mod history;
pub mod player;
pub mod selection;
pub mod session;

pub use history::*;
pub use player::*;
pub use selection::*;
pub use session::*;
