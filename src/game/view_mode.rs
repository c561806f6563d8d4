//! View orientation for board rendering
//!
//! Controls which side of the board faces the viewer. Viewing as Black flips
//! the table and every occupied square's piece, the same way a CSS rotation
//! flips the rendered table and each piece image. The orientation is set on
//! explicit colour selection and re-applied after each confirmed move with
//! the configured viewing colour; it does not follow the side to move.

use crate::game::rules::BoardState;
use crate::game::types::{PieceColor, PieceRef, Square, MAX_COORD, MIN_COORD};

/// A piece as the renderer should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPiece {
    pub square: Square,
    pub piece: PieceRef,
    /// Asset to draw, derived from `piece`
    pub asset: String,
    pub flipped: bool,
}

/// Render snapshot of the whole board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardView {
    pub viewer: PieceColor,
    pub table_flipped: bool,
    /// Occupied squares in grid order
    pub pieces: Vec<RenderedPiece>,
}

impl BoardView {
    pub fn render(viewer: PieceColor, board: &BoardState) -> Self {
        let flipped = viewer == PieceColor::Black;
        let pieces = board
            .occupied()
            .map(|(square, piece)| RenderedPiece {
                square,
                piece,
                asset: piece.asset_code(),
                flipped,
            })
            .collect();
        Self {
            viewer,
            table_flipped: flipped,
            pieces,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<&RenderedPiece> {
        self.pieces.iter().find(|rendered| rendered.square == square)
    }

    /// Squares in screen order (top row first, left to right)
    ///
    /// White sees row 1 (rank 8) at the top; Black sees the grid rotated by
    /// 180 degrees.
    pub fn display_rows(&self) -> Vec<Vec<Square>> {
        let forward: Vec<u8> = (MIN_COORD..=MAX_COORD).collect();
        let order: Vec<u8> = if self.table_flipped {
            forward.iter().rev().copied().collect()
        } else {
            forward
        };

        order
            .iter()
            .map(|&row| {
                order
                    .iter()
                    .filter_map(|&col| Square::new(row, col))
                    .collect()
            })
            .collect()
    }
}

/// View orientation controller
#[derive(Debug, Clone, Default)]
pub struct ViewOrientation {
    current: PieceColor,
    view: BoardView,
}

impl ViewOrientation {
    pub fn new(viewer: PieceColor, board: &BoardState) -> Self {
        Self {
            current: viewer,
            view: BoardView::render(viewer, board),
        }
    }

    pub fn current(&self) -> PieceColor {
        self.current
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Re-render every occupied square for `viewer` and remember the colour
    ///
    /// Returns whether the rendered view changed. Calling twice with the same
    /// colour on the same board returns `false` the second time.
    pub fn set_orientation(&mut self, viewer: PieceColor, board: &BoardState) -> bool {
        let view = BoardView::render(viewer, board);
        self.current = viewer;
        if view == self.view {
            return false;
        }
        self.view = view;
        true
    }
}
