//! Client-side move capture for a remotely refereed chess board
//!
//! Turns clicks and drags on an 8x8 grid into move requests for a remote
//! authority, applies the moves it accepts and keeps a readable move log.
//!
//! - [`game`] - Board grid, move classification, session and move pipeline
//! - [`networking`] - The authority seam and its HTTP client
//! - [`core`] - Settings and their persistence
//! - [`ui`] - Terminal front end

pub mod core;
pub mod game;
pub mod networking;
pub mod ui;
