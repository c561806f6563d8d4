//! Error types for game module
//!
//! Covers malformed click targets, board lookups and session operations.
//! Errors raised inside a move attempt never escape the attempt: the input
//! pipeline turns them into an outcome and returns the selection to idle.

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A click target id that is not `"<row>-<col>"` on the board
    #[error("Malformed square id: {id:?}")]
    MalformedSquare { id: String },

    /// Coordinates outside `1..=8`
    #[error("Square ({row}, {col}) is off the board")]
    OffBoard { row: u8, col: u8 },

    /// Algebraic square name that does not parse
    #[error("Invalid square notation: {notation:?}")]
    InvalidNotation { notation: String },

    /// Colour name that is neither white nor black
    #[error("Unknown color: {value:?}")]
    UnknownColor { value: String },

    /// Layout text that cannot be turned into a grid
    #[error("Invalid board layout: {message}")]
    InvalidLayout { message: String },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
