//! Move history ledger
//!
//! Keeps the list of confirmed moves and the paired display rows the move
//! list shows (`1. e2-e4 e7-e5`).
//!
//! # Pairing
//!
//! - A White move opens a new row with the current move number, then the
//!   number advances.
//! - A Black move joins the most recent row when that row has no Black move
//!   yet. Otherwise it opens an orphan row numbered 0 (Black moved with no
//!   White move on record, e.g. after the history was cleared mid-game).
//!
//! The ledger is append-only. [`MoveHistory::clear`] is the only way to drop
//! entries, and it also resets the move number to 1.

use crate::game::types::PieceColor;

/// One confirmed ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub color: PieceColor,
    pub move_number: u32,
    pub notation: String,
}

/// A display line of the move list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRow {
    /// 0 for an orphan Black row
    pub number: u32,
    pub white: Option<HistoryEntry>,
    pub black: Option<HistoryEntry>,
}

impl std::fmt::Display for MoveRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.white, &self.black) {
            (Some(white), Some(black)) => {
                write!(f, "{}. {} {}", self.number, white.notation, black.notation)
            }
            (Some(white), None) => write!(f, "{}. {}", self.number, white.notation),
            (None, Some(black)) => write!(f, "... {}", black.notation),
            (None, None) => Ok(()),
        }
    }
}

/// Ledger of confirmed moves
#[derive(Debug, Clone)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
    rows: Vec<MoveRow>,
    next_move_number: u32,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            rows: Vec::new(),
            next_move_number: 1,
        }
    }
}

impl MoveHistory {
    /// Append a confirmed move and return the entry that was recorded
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut history = MoveHistory::default();
    /// history.record(PieceColor::White, "e2-e4");
    /// history.record(PieceColor::Black, "e7-e5");
    /// assert_eq!(history.rows()[0].to_string(), "1. e2-e4 e7-e5");
    /// ```
    pub fn record(&mut self, color: PieceColor, notation: impl Into<String>) -> HistoryEntry {
        let notation = notation.into();
        let entry = match color {
            PieceColor::White => {
                let entry = HistoryEntry {
                    color,
                    move_number: self.next_move_number,
                    notation,
                };
                self.rows.push(MoveRow {
                    number: self.next_move_number,
                    white: Some(entry.clone()),
                    black: None,
                });
                self.next_move_number += 1;
                entry
            }
            PieceColor::Black => match self.rows.last_mut() {
                Some(row) if row.black.is_none() => {
                    let entry = HistoryEntry {
                        color,
                        move_number: row.number,
                        notation,
                    };
                    row.black = Some(entry.clone());
                    entry
                }
                _ => {
                    let entry = HistoryEntry {
                        color,
                        move_number: 0,
                        notation,
                    };
                    self.rows.push(MoveRow {
                        number: 0,
                        white: None,
                        black: Some(entry.clone()),
                    });
                    entry
                }
            },
        };

        self.entries.push(entry.clone());
        entry
    }

    /// Every recorded ply, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Paired display rows, oldest first
    pub fn rows(&self) -> &[MoveRow] {
        &self.rows
    }

    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Number of plies recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number the next White move will get
    pub fn next_move_number(&self) -> u32 {
        self.next_move_number
    }

    /// Drop everything (new game / board reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Move list as text, one display row per line
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_history_default() {
        //! Verifies MoveHistory starts empty at move 1
        let history = MoveHistory::default();

        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.last_entry().is_none());
        assert_eq!(history.next_move_number(), 1);
    }

    #[test]
    fn test_white_black_white_pairing() {
        //! Three plies make two rows; the second row has only White at move 2
        let mut history = MoveHistory::default();
        history.record(PieceColor::White, "e2-e4");
        history.record(PieceColor::Black, "e7-e5");
        history.record(PieceColor::White, "Ng1-f3");

        let rows = history.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert!(rows[0].white.is_some() && rows[0].black.is_some());
        assert_eq!(rows[1].number, 2);
        assert!(rows[1].white.is_some());
        assert!(rows[1].black.is_none());

        assert_eq!(history.to_text(), "1. e2-e4 e7-e5\n2. Ng1-f3");
    }

    #[test]
    fn test_entry_move_numbers() {
        let mut history = MoveHistory::default();
        let w1 = history.record(PieceColor::White, "e2-e4");
        let b1 = history.record(PieceColor::Black, "e7-e5");
        let w2 = history.record(PieceColor::White, "d2-d4");

        assert_eq!(w1.move_number, 1);
        assert_eq!(b1.move_number, 1);
        assert_eq!(w2.move_number, 2);
        assert_eq!(history.next_move_number(), 3);
    }

    #[test]
    fn test_orphan_black_move() {
        //! Black with no White row on record opens a row numbered 0
        let mut history = MoveHistory::default();
        let entry = history.record(PieceColor::Black, "e7-e5");

        assert_eq!(entry.move_number, 0);
        assert_eq!(history.rows().len(), 1);
        assert!(history.rows()[0].white.is_none());
        assert_eq!(history.rows()[0].to_string(), "... e7-e5");
        // White still starts at move 1.
        assert_eq!(history.record(PieceColor::White, "e2-e4").move_number, 1);
    }

    #[test]
    fn test_second_black_move_opens_orphan_row() {
        let mut history = MoveHistory::default();
        history.record(PieceColor::White, "e2-e4");
        history.record(PieceColor::Black, "e7-e5");
        let extra = history.record(PieceColor::Black, "d7-d5");

        assert_eq!(extra.move_number, 0);
        assert_eq!(history.rows().len(), 2);
        assert_eq!(history.rows()[0].black.as_ref().unwrap().notation, "e7-e5");
    }

    #[test]
    fn test_entries_are_append_only_in_order() {
        let mut history = MoveHistory::default();
        for i in 0..6 {
            let color = if i % 2 == 0 {
                PieceColor::White
            } else {
                PieceColor::Black
            };
            history.record(color, format!("m{i}"));
        }

        let keys: Vec<(u32, u8)> = history
            .entries()
            .iter()
            .map(|e| (e.move_number, e.color.ply_rank()))
            .collect();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(history.last_entry().unwrap().notation, "m5");
    }

    #[test]
    fn test_clear_resets_numbering() {
        let mut history = MoveHistory::default();
        history.record(PieceColor::White, "e2-e4");
        history.record(PieceColor::Black, "e7-e5");
        history.clear();

        assert!(history.is_empty());
        assert!(history.rows().is_empty());
        assert_eq!(history.next_move_number(), 1);
        assert_eq!(history.to_text(), "");
    }
}
