//! Type definitions for the move-capture layer
//!
//! Provides the coordinate, piece and move types shared by every other game
//! module. Coordinates follow the on-screen grid: row 1 is the top row (rank 8,
//! Black's back rank) and row 8 is the bottom row (rank 1, White's back rank).
//! Columns run left to right from file `a` (1) to file `h` (8).

use crate::game::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};

/// Lowest valid row/column index
pub const MIN_COORD: u8 = 1;
/// Highest valid row/column index
pub const MAX_COORD: u8 = 8;

/// Side a piece belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Prefix used by asset codes (`w` / `b`)
    pub fn prefix(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }

    /// Ordering rank used by the history ledger (White plays first)
    pub fn ply_rank(self) -> u8 {
        match self {
            PieceColor::White => 0,
            PieceColor::Black => 1,
        }
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceColor::White => write!(f, "White"),
            PieceColor::Black => write!(f, "Black"),
        }
    }
}

impl std::str::FromStr for PieceColor {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(PieceColor::White),
            "black" | "b" => Ok(PieceColor::Black),
            other => Err(GameError::UnknownColor {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    /// Upper-case letter used in asset codes; pawns are `P` here
    pub fn asset_letter(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
        }
    }

    pub fn from_asset_letter(letter: char) -> Option<Self> {
        match letter {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// A piece standing on the grid
///
/// Pieces have no identity beyond the square they occupy. The visual asset is
/// always derived from this value, never the other way around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceRef {
    pub color: PieceColor,
    pub kind: PieceType,
}

impl PieceRef {
    pub const fn new(color: PieceColor, kind: PieceType) -> Self {
        Self { color, kind }
    }

    /// Asset code such as `wK` or `bP`
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let knight = PieceRef::new(PieceColor::Black, PieceType::Knight);
    /// assert_eq!(knight.asset_code(), "bN");
    /// ```
    pub fn asset_code(self) -> String {
        format!("{}{}", self.color.prefix(), self.kind.asset_letter())
    }

    /// Parse an asset code (`wQ`, `bP`, ...); used when loading layouts
    pub fn from_asset_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = match chars.next()? {
            'w' => PieceColor::White,
            'b' => PieceColor::Black,
            _ => return None,
        };
        let kind = PieceType::from_asset_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { color, kind })
    }
}

/// Kinds a pawn may promote to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// Every promotable kind, in the order the prompt presents them
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    pub fn piece_type(self) -> PieceType {
        match self {
            PromotionPiece::Queen => PieceType::Queen,
            PromotionPiece::Rook => PieceType::Rook,
            PromotionPiece::Bishop => PieceType::Bishop,
            PromotionPiece::Knight => PieceType::Knight,
        }
    }

    /// Lower-case character the authority expects (`q`, `r`, `b`, `n`)
    pub fn wire_char(self) -> char {
        match self {
            PromotionPiece::Queen => 'q',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Knight => 'n',
        }
    }

    pub fn from_wire_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionPiece::Queen),
            'r' => Some(PromotionPiece::Rook),
            'b' => Some(PromotionPiece::Bishop),
            'n' => Some(PromotionPiece::Knight),
            _ => None,
        }
    }
}

/// Grid coordinate `(row, col)`, both in `1..=8`
///
/// Only constructible through checked constructors, so every `Square` in the
/// program is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square from grid coordinates, `None` when off the board
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let e1 = Square::new(8, 5).unwrap();
    /// assert!(Square::new(0, 5).is_none());
    /// ```
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let range = MIN_COORD..=MAX_COORD;
        if range.contains(&row) && range.contains(&col) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Square on the same row at another column
    pub fn with_col(self, col: u8) -> Option<Self> {
        Self::new(self.row, col)
    }

    /// Parse the UI square id format `"<row>-<col>"`
    ///
    /// Anything else (missing dash, non-numeric parts, coordinates off the
    /// board) is reported as [`GameError::MalformedSquare`].
    pub fn from_id(id: &str) -> GameResult<Self> {
        let malformed = || GameError::MalformedSquare { id: id.to_string() };

        let mut parts = id.trim().split('-');
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let row: u8 = row.trim().parse().map_err(|_| malformed())?;
        let col: u8 = col.trim().parse().map_err(|_| malformed())?;
        Self::new(row, col).ok_or_else(malformed)
    }

    /// UI square id (`"<row>-<col>"`), the inverse of [`Square::from_id`]
    pub fn id(self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// All 64 squares in row-major screen order
    pub fn all() -> impl Iterator<Item = Square> {
        (MIN_COORD..=MAX_COORD)
            .flat_map(|row| (MIN_COORD..=MAX_COORD).map(move |col| Square { row, col }))
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = GameError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new(row, col).ok_or(GameError::OffBoard { row, col })
    }
}

impl From<Square> for (u8, u8) {
    fn from(square: Square) -> Self {
        (square.row, square.col)
    }
}

/// One move attempt, built only while a square is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionPiece>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }
}
