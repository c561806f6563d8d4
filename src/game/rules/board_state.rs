//! Board grid owned by the client
//!
//! The grid is the single source of piece existence: a square either holds a
//! [`PieceRef`] or nothing. Renderers only ever read it.

use crate::game::error::{GameError, GameResult};
use crate::game::types::{PieceColor, PieceRef, PieceType, Square, MAX_COORD};

/// Standard back row, left to right (file a to h)
const BACK_ROW: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// `Square -> Option<PieceRef>` grid
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BoardState {
    cells: [[Option<PieceRef>; 8]; 8],
}

impl BoardState {
    /// Grid with no pieces
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard initial position; Black on rows 1-2, White on rows 7-8
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for (index, &kind) in BACK_ROW.iter().enumerate() {
            let col = index as u8 + 1;
            board.set(1, col, Some(PieceRef::new(PieceColor::Black, kind)));
            board.set(2, col, Some(PieceRef::new(PieceColor::Black, PieceType::Pawn)));
            board.set(7, col, Some(PieceRef::new(PieceColor::White, PieceType::Pawn)));
            board.set(8, col, Some(PieceRef::new(PieceColor::White, kind)));
        }
        board
    }

    /// Build a grid from eight lines of eight characters
    ///
    /// Upper-case letters are White, lower-case Black, `.` is empty. The first
    /// line is row 1 (rank 8). Blank lines and surrounding whitespace are
    /// ignored.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let board = BoardState::from_layout(
    ///     "....k...\n........\n........\n........\n\
    ///      ........\n........\n........\n....K..R",
    /// )?;
    /// ```
    pub fn from_layout(layout: &str) -> GameResult<Self> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != usize::from(MAX_COORD) {
            return Err(GameError::InvalidLayout {
                message: format!("expected 8 rows, found {}", rows.len()),
            });
        }

        let mut board = Self::empty();
        for (row_index, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != usize::from(MAX_COORD) {
                return Err(GameError::InvalidLayout {
                    message: format!("row {} has {} cells", row_index + 1, chars.len()),
                });
            }
            for (col_index, c) in chars.into_iter().enumerate() {
                if c == '.' {
                    continue;
                }
                let kind = PieceType::from_asset_letter(c.to_ascii_uppercase()).ok_or_else(|| {
                    GameError::InvalidLayout {
                        message: format!("unknown piece {c:?}"),
                    }
                })?;
                let color = if c.is_ascii_uppercase() {
                    PieceColor::White
                } else {
                    PieceColor::Black
                };
                board.set(
                    row_index as u8 + 1,
                    col_index as u8 + 1,
                    Some(PieceRef::new(color, kind)),
                );
            }
        }
        Ok(board)
    }

    /// Inverse of [`BoardState::from_layout`]
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in self.cells.iter() {
            for cell in row.iter() {
                out.push(match cell {
                    None => '.',
                    Some(piece) => match piece.color {
                        PieceColor::White => piece.kind.asset_letter(),
                        PieceColor::Black => piece.kind.asset_letter().to_ascii_lowercase(),
                    },
                });
            }
            out.push('\n');
        }
        out
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceRef> {
        self.cells[Self::row_index(square)][Self::col_index(square)]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Replace a square's occupant, returning the previous one
    pub fn place(&mut self, square: Square, piece: PieceRef) -> Option<PieceRef> {
        self.cells[Self::row_index(square)][Self::col_index(square)].replace(piece)
    }

    /// Empty a square, returning what stood there
    pub fn clear(&mut self, square: Square) -> Option<PieceRef> {
        self.cells[Self::row_index(square)][Self::col_index(square)].take()
    }

    /// Move whatever stands on `from` to `to`, overwriting `to`
    ///
    /// Returns the piece that moved, or `None` if `from` was empty (in which
    /// case nothing changes).
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<PieceRef> {
        let piece = self.clear(from)?;
        self.place(to, piece);
        Some(piece)
    }

    /// Occupied squares in row-major screen order
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceRef)> + '_ {
        Square::all().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn piece_count(&self) -> usize {
        self.occupied().count()
    }

    fn set(&mut self, row: u8, col: u8, piece: Option<PieceRef>) {
        self.cells[usize::from(row - 1)][usize::from(col - 1)] = piece;
    }

    fn row_index(square: Square) -> usize {
        usize::from(square.row() - 1)
    }

    fn col_index(square: Square) -> usize {
        usize::from(square.col() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let board = BoardState::starting_position();
        assert_eq!(board.piece_count(), 32);
        assert_eq!(
            board.piece_at(sq(8, 5)),
            Some(PieceRef::new(PieceColor::White, PieceType::King))
        );
        assert_eq!(
            board.piece_at(sq(1, 4)),
            Some(PieceRef::new(PieceColor::Black, PieceType::Queen))
        );
        assert_eq!(
            board.piece_at(sq(2, 3)),
            Some(PieceRef::new(PieceColor::Black, PieceType::Pawn))
        );
        assert!(board.is_empty(sq(4, 4)));
    }

    #[test]
    fn test_layout_round_trip() {
        let board = BoardState::starting_position();
        let layout = board.to_layout();
        assert!(layout.starts_with("rnbqkbnr\npppppppp\n"));
        assert_eq!(BoardState::from_layout(&layout).unwrap(), board);
    }

    #[test]
    fn test_layout_rejects_bad_input() {
        assert!(BoardState::from_layout("........").is_err());
        let bad_piece = "x.......\n".repeat(8);
        assert!(BoardState::from_layout(&bad_piece).is_err());
        let short_row = format!("{}.......\n", "........\n".repeat(7));
        assert!(BoardState::from_layout(&short_row).is_err());
    }

    #[test]
    fn test_relocate_and_clear() {
        let mut board = BoardState::starting_position();
        let moved = board.relocate(sq(7, 5), sq(5, 5));
        assert_eq!(moved, Some(PieceRef::new(PieceColor::White, PieceType::Pawn)));
        assert!(board.is_empty(sq(7, 5)));
        assert!(!board.is_empty(sq(5, 5)));

        assert!(board.relocate(sq(4, 4), sq(3, 3)).is_none());
        assert!(board.is_empty(sq(3, 3)));

        assert!(board.clear(sq(5, 5)).is_some());
        assert_eq!(board.piece_count(), 31);
    }
}
