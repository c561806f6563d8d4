//! Selection resource for tracking the armed square

use crate::game::types::Square;

/// Either nothing is selected or exactly one square is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Armed(Square),
}

/// Process-wide selection, one per session
#[derive(Debug, Clone, Default)]
pub struct Selection {
    state: SelectionState,
}

impl Selection {
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Arm a square, replacing any previous selection
    pub fn arm(&mut self, square: Square) {
        self.state = SelectionState::Armed(square);
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }

    pub fn armed(&self) -> Option<Square> {
        match self.state {
            SelectionState::Armed(square) => Some(square),
            SelectionState::Idle => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed().is_some()
    }
}
