//! Coordinate and notation translation
//!
//! Pure mapping between grid coordinates, algebraic square names (`a1`..`h8`)
//! and piece letters. Row 1 is rank 8, so ranks count down as rows count up.

use crate::game::error::{GameError, GameResult};
use crate::game::types::{PieceType, PromotionPiece, Square, MAX_COORD};

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// File letter of a square's column (column 1 -> `a`)
pub fn file_char(square: Square) -> char {
    FILES[usize::from(square.col() - 1)]
}

/// Rank digit of a square's row (row 1 -> `8`)
pub fn rank_char(square: Square) -> char {
    char::from(b'0' + (MAX_COORD + 1 - square.row()))
}

/// Algebraic name of a square
///
/// # Examples
///
/// ```rust,ignore
/// let e1 = Square::new(8, 5).unwrap();
/// assert_eq!(square_notation(e1), "e1");
/// ```
pub fn square_notation(square: Square) -> String {
    let mut name = String::with_capacity(2);
    name.push(file_char(square));
    name.push(rank_char(square));
    name
}

/// Inverse of [`square_notation`]
pub fn parse_square_notation(notation: &str) -> GameResult<Square> {
    let invalid = || GameError::InvalidNotation {
        notation: notation.to_string(),
    };

    let mut chars = notation.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(invalid());
    };

    let col = FILES.iter().position(|&f| f == file).ok_or_else(invalid)? as u8 + 1;
    let rank = rank.to_digit(10).ok_or_else(invalid)? as u8;
    if !(1..=MAX_COORD).contains(&rank) {
        return Err(invalid());
    }
    Square::new(MAX_COORD + 1 - rank, col).ok_or_else(invalid)
}

/// Short algebraic piece letter; pawns have none
pub fn piece_letter(kind: PieceType) -> &'static str {
    match kind {
        PieceType::King => "K",
        PieceType::Queen => "Q",
        PieceType::Rook => "R",
        PieceType::Bishop => "B",
        PieceType::Knight => "N",
        PieceType::Pawn => "",
    }
}

/// History notation of a confirmed move: `Ng1-f3`, `e2-e4`
pub fn move_notation(kind: PieceType, from: Square, to: Square) -> String {
    format!(
        "{}{}-{}",
        piece_letter(kind),
        square_notation(from),
        square_notation(to)
    )
}

/// Long algebraic form used by the authority's legal-move lists (`e7e8q`)
pub fn uci_move(from: Square, to: Square, promotion: Option<PromotionPiece>) -> String {
    let mut text = format!("{}{}", square_notation(from), square_notation(to));
    if let Some(piece) = promotion {
        text.push(piece.wire_char());
    }
    text
}

impl Square {
    /// Algebraic name of this square (e.g. `"e4"`)
    pub fn to_algebraic(self) -> String {
        square_notation(self)
    }

    /// Square from its algebraic name (e.g. `"e4"`)
    pub fn from_algebraic(notation: &str) -> GameResult<Self> {
        parse_square_notation(notation)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", file_char(*self), rank_char(*self))
    }
}
