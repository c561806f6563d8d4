//! Board projection: apply a confirmed move to the grid
//!
//! Only called after the authority accepted the move. It performs the visual
//! result of the classification without checking anything.

use crate::game::rules::{castle_rook_squares, BoardState, MoveClassification};
use crate::game::types::{MoveRequest, PieceRef};
use tracing::{debug, warn};

/// Apply a confirmed move and return the piece now standing on the destination
///
/// - Ordinary / promotion: clear the origin, then place the moving piece (or
///   the promoted piece) on the destination.
/// - Castle: move the king, then the rook from its corner; both origins end
///   empty.
/// - En passant: clear the captured pawn's square, then move the pawn.
pub fn apply_confirmed_move(
    board: &mut BoardState,
    classification: &MoveClassification,
    request: &MoveRequest,
    piece: PieceRef,
) -> PieceRef {
    match classification {
        MoveClassification::Castle { kingside } => {
            board.clear(request.from);
            board.place(request.to, piece);
            match castle_rook_squares(request.from, request.to) {
                Some((rook_from, rook_to)) => {
                    if board.relocate(rook_from, rook_to).is_none() {
                        warn!("[MOVEMENT] No rook on {} for castling", rook_from);
                    }
                    debug!(
                        "[MOVEMENT] Castled {} (rook {} -> {})",
                        if *kingside { "kingside" } else { "queenside" },
                        rook_from,
                        rook_to
                    );
                }
                None => warn!("[MOVEMENT] Castle landing {} has no rook file", request.to),
            }
            piece
        }
        MoveClassification::EnPassant { captured } => {
            board.clear(*captured);
            board.clear(request.from);
            board.place(request.to, piece);
            debug!("[MOVEMENT] En passant removed pawn on {}", captured);
            piece
        }
        MoveClassification::Promotion { choice } => {
            let promoted = choice
                .or(request.promotion)
                .map(|chosen| PieceRef::new(piece.color, chosen.piece_type()))
                .unwrap_or(piece);
            board.clear(request.from);
            board.place(request.to, promoted);
            promoted
        }
        MoveClassification::Ordinary => {
            board.clear(request.from);
            board.place(request.to, piece);
            piece
        }
    }
}
