//! Pawn promotion gate
//!
//! When a move is classified as a promotion, the attempt suspends on a
//! [`PromotionGate`] until the player picks a piece or cancels. The gate never
//! times out on its own. A cancelled gate aborts the attempt before anything
//! is sent to the authority or changed on the board.
//!
//! [`PromotionChannel`] forwards each prompt to a UI task over a tokio
//! channel and waits for the reply; dropping the reply sender cancels. The
//! terminal shell in [`crate::ui::terminal`] answers those prompts from stdin.

use crate::game::types::{PieceColor, PieceRef, PromotionPiece, Square};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

/// The one promotion choice currently waiting on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    /// Colour of the promoting pawn
    pub color: PieceColor,
    pub from: Square,
    pub to: Square,
}

impl PendingPromotion {
    /// Pieces to present, in display order
    pub fn options(&self) -> [PieceRef; 4] {
        promotion_options(self.color)
    }
}

/// The four pieces a pawn of `color` may become
pub fn promotion_options(color: PieceColor) -> [PieceRef; 4] {
    PromotionPiece::ALL.map(|piece| PieceRef::new(color, piece.piece_type()))
}

/// Asks the player which piece a pawn promotes to
#[async_trait]
pub trait PromotionGate: Send {
    /// Resolve with the player's pick, or `None` when they cancel
    async fn request_promotion_choice(&mut self, pending: &PendingPromotion)
        -> Option<PromotionPiece>;
}

/// A prompt delivered to the UI side of a [`PromotionChannel`]
#[derive(Debug)]
pub struct PromotionPrompt {
    pub pending: PendingPromotion,
    reply: oneshot::Sender<Option<PromotionPiece>>,
}

impl PromotionPrompt {
    /// Answer with the player's pick
    pub fn choose(self, piece: PromotionPiece) {
        let _ = self.reply.send(Some(piece));
    }

    /// Close the prompt without a pick
    pub fn cancel(self) {
        let _ = self.reply.send(None);
    }
}

/// Gate that hands prompts to a UI task and waits for its answer
#[derive(Debug)]
pub struct PromotionChannel {
    prompts: mpsc::Sender<PromotionPrompt>,
}

impl PromotionChannel {
    /// Create the gate and the receiver the UI listens on
    pub fn new() -> (Self, mpsc::Receiver<PromotionPrompt>) {
        // One slot: only one gate can be open at a time.
        let (prompts, receiver) = mpsc::channel(1);
        (Self { prompts }, receiver)
    }
}

#[async_trait]
impl PromotionGate for PromotionChannel {
    async fn request_promotion_choice(
        &mut self,
        pending: &PendingPromotion,
    ) -> Option<PromotionPiece> {
        let (reply, answer) = oneshot::channel();
        let prompt = PromotionPrompt {
            pending: *pending,
            reply,
        };

        if self.prompts.send(prompt).await.is_err() {
            warn!("[PROMOTION] No UI listening for promotion prompts; cancelling");
            return None;
        }

        match answer.await {
            Ok(choice) => choice,
            Err(_) => {
                info!("[PROMOTION] Prompt dropped without an answer; cancelling");
                None
            }
        }
    }
}
