//! Player interaction resources
//!
//! Everything that waits on the player's input beyond a plain click.

pub mod promotion;
pub use promotion::*;
