//! Move attempt pipeline: clicks and drags in, confirmed moves out
//!
//! [`MoveController`] owns the [`GameSession`] together with the remote
//! authority and the promotion gate. Each gesture runs the same pipeline:
//!
//! 1. classify the move from the armed piece and the two squares
//! 2. await the promotion choice when the move promotes
//! 3. await the authority's verdict
//! 4. apply and record the move, or abort
//!
//! Nothing in the session is touched before an accepting verdict arrives. The
//! commit happens after the last `.await` inside one `&mut self` section, so
//! the next click can never observe a half-applied move. Every attempt ends
//! with the selection back at `Idle`.
//!
//! [`InputHandle`] shares one controller between event sources. While an
//! attempt is suspended the handle answers [`ClickOutcome::Busy`] instead of
//! starting a second one.
//!
//! # Examples
//!
//! ```rust,ignore
//! let mut controller = MoveController::new(authority, gate, PieceColor::White);
//! controller.click("7-5").await;              // arm e2
//! match controller.click("5-5").await {       // attempt e2-e4
//!     ClickOutcome::Attempted(AttemptOutcome::Applied { entry, .. }) => {
//!         println!("{}", entry.notation);     // "e2-e4"
//!     }
//!     other => println!("{:?}", other),
//! }
//! ```

use crate::game::notation::{move_notation, parse_square_notation, square_notation, uci_move};
use crate::game::resources::{GameSession, HistoryEntry, PendingPromotion, PromotionGate};
use crate::game::rules::{classify, MoveClassification};
use crate::game::systems::movement::apply_confirmed_move;
use crate::game::types::{MoveRequest, PieceColor, PieceRef, Square};
use crate::networking::client::{AuthorityResult, MoveSubmission, MoveVerdict, RemoteAuthority};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

/// How a move attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Accepted by the authority and applied to the board
    Applied {
        classification: MoveClassification,
        entry: HistoryEntry,
    },
    /// The authority said no; the board is unchanged
    Rejected { message: Option<String> },
    /// The authority could not be reached; handled like a rejection
    TransportFailed { error: String },
    /// The player closed the promotion prompt; the authority was never called
    PromotionCancelled,
    /// A square id could not be parsed or the armed square was empty
    Malformed,
}

impl AttemptOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, AttemptOutcome::Applied { .. })
    }
}

/// What a single click or drop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Empty square while idle, or an unparseable target while idle
    Ignored,
    Armed(Square),
    /// The armed square was clicked again
    Deselected,
    Attempted(AttemptOutcome),
    /// Another attempt is still in flight
    Busy,
}

/// Drives one game session against a remote authority
pub struct MoveController<A, P> {
    session: GameSession,
    authority: A,
    gate: P,
}

impl<A, P> MoveController<A, P>
where
    A: RemoteAuthority,
    P: PromotionGate,
{
    pub fn new(authority: A, gate: P, view_color: PieceColor) -> Self {
        Self {
            session: GameSession::new(view_color),
            authority,
            gate,
        }
    }

    /// Resume from an existing session (e.g. a position loaded from a layout)
    pub fn with_session(authority: A, gate: P, session: GameSession) -> Self {
        Self {
            session,
            authority,
            gate,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Explicit viewing colour selection from the player
    pub fn set_view_color(&mut self, color: PieceColor) -> bool {
        info!("[INPUT] Viewing as {}", color);
        self.session.set_view_color(color)
    }

    /// Handle a click on the square with UI id `target_id` (`"row-col"`)
    pub async fn click(&mut self, target_id: &str) -> ClickOutcome {
        let target = match Square::from_id(target_id) {
            Ok(square) => square,
            Err(e) => {
                debug!("[INPUT] Ignoring click: {}", e);
                let was_armed = self.session.selection.is_armed();
                self.session.selection.clear();
                return if was_armed {
                    ClickOutcome::Attempted(AttemptOutcome::Malformed)
                } else {
                    ClickOutcome::Ignored
                };
            }
        };

        match self.session.selection.armed() {
            None => {
                if self.session.board.is_empty(target) {
                    return ClickOutcome::Ignored;
                }
                self.session.selection.arm(target);
                debug!("[INPUT] Armed {}", target);
                ClickOutcome::Armed(target)
            }
            Some(armed) if armed == target => {
                self.session.selection.clear();
                debug!("[INPUT] Deselected {}", target);
                ClickOutcome::Deselected
            }
            Some(armed) => ClickOutcome::Attempted(self.attempt(armed, target).await),
        }
    }

    /// Handle a drag from one square id to another
    ///
    /// Arms the origin and attempts the move in one gesture. Dropping a piece
    /// back on its own square, or dragging from an empty square, does nothing.
    pub async fn drop_piece(&mut self, from_id: &str, to_id: &str) -> ClickOutcome {
        let (from, to) = match (Square::from_id(from_id), Square::from_id(to_id)) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => {
                debug!("[INPUT] Ignoring drop: {}", e);
                self.session.selection.clear();
                return ClickOutcome::Attempted(AttemptOutcome::Malformed);
            }
        };

        if from == to || self.session.board.is_empty(from) {
            self.session.selection.clear();
            return ClickOutcome::Ignored;
        }

        self.session.selection.arm(from);
        ClickOutcome::Attempted(self.attempt(from, to).await)
    }

    async fn attempt(&mut self, from: Square, to: Square) -> AttemptOutcome {
        let outcome = self.run_attempt(from, to).await;
        self.session.selection.clear();
        outcome
    }

    async fn run_attempt(&mut self, from: Square, to: Square) -> AttemptOutcome {
        let Some(piece) = self.session.board.piece_at(from) else {
            warn!("[INPUT] Armed square {} is empty", from);
            return AttemptOutcome::Malformed;
        };

        let mut classification = classify(piece, from, to, self.session.board.is_empty(to));
        debug!("[INPUT] {} -> {} classified as {:?}", from, to, classification);

        if classification.needs_promotion_choice() {
            let pending = PendingPromotion {
                color: piece.color,
                from,
                to,
            };
            match self.gate.request_promotion_choice(&pending).await {
                Some(choice) => classification = classification.with_promotion_choice(choice),
                None => {
                    info!("[INPUT] Promotion on {} cancelled", to);
                    return AttemptOutcome::PromotionCancelled;
                }
            }
        }

        let request = MoveRequest {
            from,
            to,
            promotion: classification.promotion_choice(),
        };
        debug!(
            "[INPUT] Submitting {}",
            uci_move(from, to, request.promotion)
        );
        let submission = MoveSubmission {
            from: square_notation(from),
            to: square_notation(to),
            promotion: request.promotion.map(|p| p.wire_char()),
            fen: self.session.current_fen.clone(),
        };

        let verdict = match self.authority.make_move(submission).await {
            Ok(verdict) => verdict,
            Err(e) => {
                error!("[INPUT] Move {}-{} not sent: {}", from, to, e);
                return AttemptOutcome::TransportFailed {
                    error: e.to_string(),
                };
            }
        };

        if !verdict.success {
            warn!(
                "[INPUT] Move {}-{} rejected: {}",
                from,
                to,
                verdict.message.as_deref().unwrap_or("no reason given")
            );
            return AttemptOutcome::Rejected {
                message: verdict.message,
            };
        }

        let entry = self.commit(&classification, &request, piece, verdict);
        AttemptOutcome::Applied {
            classification,
            entry,
        }
    }

    /// Apply an accepted move. No awaits past this point.
    fn commit(
        &mut self,
        classification: &MoveClassification,
        request: &MoveRequest,
        piece: PieceRef,
        verdict: MoveVerdict,
    ) -> HistoryEntry {
        let session = &mut self.session;

        let placed = apply_confirmed_move(&mut session.board, classification, request, piece);
        let notation = move_notation(placed.kind, request.from, request.to);
        let entry = session.history.record(piece.color, notation);

        if verdict.fen.is_some() {
            session.current_fen = verdict.fen;
        }
        session.legal_moves = verdict.legal_moves;
        session.side_to_move = session.side_to_move.opposite();
        session.refresh_view();

        info!(
            "[INPUT] {} played {} (move {})",
            entry.color, entry.notation, entry.move_number
        );
        entry
    }

    /// Start a new game on the authority, then reset the session
    ///
    /// On failure the session is left exactly as it was.
    pub async fn new_game(&mut self) -> AuthorityResult<()> {
        let start = self.authority.start_game().await?;
        self.session.reset();
        self.session.current_fen = start.fen;
        self.session.legal_moves = start.legal_moves;
        info!(
            "[INPUT] New game started ({} legal moves)",
            self.session.legal_moves.len()
        );
        Ok(())
    }

    /// Reset the board and history locally without telling the authority
    pub fn reset_board(&mut self) {
        self.session.reset();
        info!("[INPUT] Board reset");
    }

    /// Adopt the authority's current position and legal moves
    ///
    /// Only the authority's view of the position is refreshed; the grid is
    /// left alone.
    pub async fn sync_with_authority(&mut self) -> AuthorityResult<()> {
        let state = self.authority.fetch_state().await?;
        if state.fen.is_some() {
            self.session.current_fen = state.fen;
        }
        self.session.legal_moves = state.legal_moves;
        debug!(
            "[INPUT] Synced with authority ({} legal moves)",
            self.session.legal_moves.len()
        );
        Ok(())
    }

    /// Destinations the authority's legal-move list allows for the armed piece
    pub fn move_hints(&self) -> Vec<Square> {
        let Some(armed) = self.session.selection.armed() else {
            return Vec::new();
        };
        let origin = square_notation(armed);

        let mut hints: Vec<Square> = Vec::new();
        for uci in &self.session.legal_moves {
            let (Some(from), Some(to)) = (uci.get(0..2), uci.get(2..4)) else {
                continue;
            };
            if from != origin {
                continue;
            }
            if let Ok(square) = parse_square_notation(to) {
                // Promotion moves list the same destination four times.
                if !hints.contains(&square) {
                    hints.push(square);
                }
            }
        }
        hints
    }
}

/// Shared, busy-aware access to one [`MoveController`]
pub struct InputHandle<A, P> {
    inner: Arc<Mutex<MoveController<A, P>>>,
}

impl<A, P> Clone for InputHandle<A, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, P> InputHandle<A, P>
where
    A: RemoteAuthority,
    P: PromotionGate,
{
    pub fn new(controller: MoveController<A, P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Forward a click, or answer `Busy` while an attempt is in flight
    pub async fn click(&self, target_id: &str) -> ClickOutcome {
        match self.inner.try_lock() {
            Ok(mut controller) => controller.click(target_id).await,
            Err(_) => {
                debug!("[INPUT] Busy, dropping click on {}", target_id);
                ClickOutcome::Busy
            }
        }
    }

    /// Forward a drag, or answer `Busy` while an attempt is in flight
    pub async fn drop_piece(&self, from_id: &str, to_id: &str) -> ClickOutcome {
        match self.inner.try_lock() {
            Ok(mut controller) => controller.drop_piece(from_id, to_id).await,
            Err(_) => {
                debug!("[INPUT] Busy, dropping drag {} -> {}", from_id, to_id);
                ClickOutcome::Busy
            }
        }
    }

    /// Wait for exclusive access (new game, reset, rendering)
    pub async fn lock(&self) -> MutexGuard<'_, MoveController<A, P>> {
        self.inner.lock().await
    }

    /// Exclusive access, or `None` while an attempt is in flight
    pub fn try_lock(&self) -> Option<MutexGuard<'_, MoveController<A, P>>> {
        self.inner.try_lock().ok()
    }
}
