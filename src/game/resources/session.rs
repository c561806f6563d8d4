//! Game session: the one owner of all per-game mutable state
//!
//! Bundles the board grid, selection, history, view orientation, side to
//! move and the authority's last reported position. A new game or a local
//! reset goes through [`GameSession::reset`].

use super::history::MoveHistory;
use super::selection::Selection;
use crate::game::rules::BoardState;
use crate::game::types::PieceColor;
use crate::game::view_mode::ViewOrientation;

#[derive(Debug, Clone)]
pub struct GameSession {
    pub board: BoardState,
    pub selection: Selection,
    pub history: MoveHistory,
    pub orientation: ViewOrientation,
    /// Colour expected to move next
    pub side_to_move: PieceColor,
    /// Configured viewing colour, re-applied after each confirmed move
    pub view_color: PieceColor,
    /// Last position the authority reported
    pub current_fen: Option<String>,
    /// Legal moves the authority listed with that position (`e2e4`, `e7e8q`)
    pub legal_moves: Vec<String>,
}

impl GameSession {
    pub fn new(view_color: PieceColor) -> Self {
        let board = BoardState::starting_position();
        let orientation = ViewOrientation::new(view_color, &board);
        Self {
            board,
            selection: Selection::default(),
            history: MoveHistory::default(),
            orientation,
            side_to_move: PieceColor::White,
            view_color,
            current_fen: None,
            legal_moves: Vec::new(),
        }
    }

    /// Back to the starting position with an empty history
    ///
    /// The configured view colour survives the reset.
    pub fn reset(&mut self) {
        *self = Self::new(self.view_color);
    }

    /// Explicit viewing colour selection
    pub fn set_view_color(&mut self, color: PieceColor) -> bool {
        self.view_color = color;
        self.orientation.set_orientation(color, &self.board)
    }

    /// Re-render after the board changed
    pub fn refresh_view(&mut self) -> bool {
        self.orientation.set_orientation(self.view_color, &self.board)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(PieceColor::White)
    }
}
