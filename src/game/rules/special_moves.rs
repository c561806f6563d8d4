//! Special-move intent detection
//!
//! Classifies a pending move as ordinary, castle, en passant or promotion from
//! the moving piece and the squares involved. This is a guess at what the
//! player means so the client knows what to ask and what to redraw. Legality
//! is decided by the remote authority afterwards.
//!
//! Rules, in priority order:
//!
//! 1. King moving two columns: castle (kingside when moving toward column 8)
//! 2. Pawn moving one column sideways into an empty square: en passant
//! 3. Pawn reaching its far row: promotion
//! 4. Anything else: ordinary

use crate::game::types::{PieceColor, PieceRef, PieceType, PromotionPiece, Square, MAX_COORD, MIN_COORD};

/// What a move attempt is believed to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveClassification {
    Ordinary,
    Castle { kingside: bool },
    EnPassant { captured: Square },
    /// `choice` is `None` until the player picks a piece
    Promotion { choice: Option<PromotionPiece> },
}

impl MoveClassification {
    pub fn needs_promotion_choice(&self) -> bool {
        matches!(self, MoveClassification::Promotion { choice: None })
    }

    /// Record the player's promotion pick
    ///
    /// A pick can only be made once; later calls and calls on other
    /// classifications leave the value unchanged.
    pub fn with_promotion_choice(self, piece: PromotionPiece) -> Self {
        match self {
            MoveClassification::Promotion { choice: None } => MoveClassification::Promotion {
                choice: Some(piece),
            },
            other => other,
        }
    }

    pub fn promotion_choice(&self) -> Option<PromotionPiece> {
        match self {
            MoveClassification::Promotion { choice } => *choice,
            _ => None,
        }
    }
}

/// Classify a move attempt
///
/// `destination_was_empty` must describe the grid before anything moved.
pub fn classify(
    piece: PieceRef,
    from: Square,
    to: Square,
    destination_was_empty: bool,
) -> MoveClassification {
    let col_diff = from.col().abs_diff(to.col());

    if piece.kind == PieceType::King && col_diff == 2 {
        return MoveClassification::Castle {
            kingside: to.col() > from.col(),
        };
    }

    if piece.kind == PieceType::Pawn && destination_was_empty && col_diff == 1 {
        if let Some(captured) = en_passant_captured_square(from, to) {
            return MoveClassification::EnPassant { captured };
        }
    }

    if piece.kind == PieceType::Pawn && to.row() == promotion_row(piece.color) {
        return MoveClassification::Promotion { choice: None };
    }

    MoveClassification::Ordinary
}

/// Row a pawn of this colour promotes on
pub fn promotion_row(color: PieceColor) -> u8 {
    match color {
        PieceColor::White => MIN_COORD,
        PieceColor::Black => MAX_COORD,
    }
}

/// Square of the pawn taken en passant: the destination's column on the
/// origin's row
pub fn en_passant_captured_square(from: Square, to: Square) -> Option<Square> {
    from.with_col(to.col())
}

/// Rook origin and destination for a castle landing the king on `king_to`
///
/// The rook starts in the corner of the king's row (column 8 kingside,
/// column 1 queenside) and lands on the square the king crossed, one column
/// from the king's origin toward that corner.
pub fn castle_rook_squares(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    let kingside = king_to.col() > king_from.col();
    let (rook_col, landing_col) = if kingside {
        (MAX_COORD, king_from.col().checked_add(1)?)
    } else {
        (MIN_COORD, king_from.col().checked_sub(1)?)
    };
    Some((king_from.with_col(rook_col)?, king_from.with_col(landing_col)?))
}
