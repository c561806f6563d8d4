//! Board rules module - Pure logic without I/O
//!
//! Holds the client-owned board grid and the special-move intent detector.
//! Nothing here decides legality; that belongs to the remote authority.
//!
//! # Module Structure
//!
//! - `board_state` - `Square -> Option<PieceRef>` grid, initial position, text layouts
//! - `special_moves` - Castle / en passant / promotion classification

pub mod board_state;
pub mod special_moves;

// Re-export commonly used items
pub use board_state::BoardState;
pub use special_moves::{
    castle_rook_squares, classify, en_passant_captured_square, promotion_row, MoveClassification,
};
