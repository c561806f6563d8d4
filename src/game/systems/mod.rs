//! Game systems - the behaviour that drives a session
//!
//! # System Organization
//!
//! - [`input`] - Click/drag dispatch and the move attempt pipeline
//! - [`movement`] - Applies an authority-confirmed move to the board grid
//!
//! # Execution Order
//!
//! ```text
//! ┌─────────────────┐
//! │ Input           │  Click or drag arms a square / picks a destination
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Classify        │  castle / en passant / promotion / ordinary
//! │ (+ promotion)   │  → waits on the promotion gate when needed
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Authority       │  Remote legality check
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Movement        │  Projection, history, orientation refresh
//! └─────────────────┘
//! ```

pub mod input;
pub mod movement;

pub use input::{AttemptOutcome, ClickOutcome, InputHandle, MoveController};
pub use movement::apply_confirmed_move;
