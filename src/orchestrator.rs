//! Move orchestration: the sole authority over game-state transitions.
//!
//! Validates human moves, commits accepted moves (record, feedback,
//! status, position), and sequences the automated reply after each
//! committed human move. Human and automated turns are strictly
//! sequential; at most one engine request is outstanding per puzzle.

use crate::engine::EngineClient;
use crate::events::PuzzleEvent;
use crate::feedback::FeedbackDispatcher;
use crate::rules::{AppliedMove, RulesEngine};
use crate::status::StatusNarrator;
use crate::types::{CandidateMove, Color, MoveOutcome, MoveRecord, Promotion, Rejection, Square};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Status line published when the engine cannot supply a reply. The
/// position is left unchanged; without this notice the puzzle would
/// appear to hang waiting for a move that never comes.
pub const ENGINE_UNAVAILABLE_STATUS: &str = "Engine unavailable - your opponent cannot reply";

/// Tunables for one puzzle session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Search depth passed to the engine service.
    pub search_depth: u32,
    /// Debounce window for status emission.
    pub status_window: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            search_depth: crate::engine::DEFAULT_SEARCH_DEPTH,
            status_window: crate::status::DEFAULT_STATUS_WINDOW,
        }
    }
}

/// Owns the game state and sequences human and automated turns.
///
/// The rules engine (and thus the position) is exclusive to one
/// orchestrator; nothing else mutates it. The move log is append-only.
pub struct MoveOrchestrator {
    rules: Box<dyn RulesEngine>,
    human: Color,
    history: Vec<MoveRecord>,
    engine: Arc<dyn EngineClient>,
    search_depth: u32,
    feedback: FeedbackDispatcher,
    narrator: StatusNarrator,
    tx: mpsc::UnboundedSender<PuzzleEvent>,
}

impl MoveOrchestrator {
    /// Creates an orchestrator over a freshly constructed rules engine.
    ///
    /// The human plays the side to move of the starting position.
    pub fn new(
        rules: Box<dyn RulesEngine>,
        engine: Arc<dyn EngineClient>,
        options: &SessionOptions,
        tx: mpsc::UnboundedSender<PuzzleEvent>,
    ) -> Self {
        let human = rules.turn();
        info!(human = %human, "starting puzzle orchestration");
        Self {
            rules,
            human,
            history: Vec::new(),
            engine,
            search_depth: options.search_depth,
            feedback: FeedbackDispatcher::new(tx.clone()),
            narrator: StatusNarrator::new(tx.clone(), options.status_window),
            tx,
        }
    }

    /// Side the human plays.
    pub fn human_side(&self) -> Color {
        self.human
    }

    /// The full game log, in order of application.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Current position as FEN.
    pub fn position(&self) -> String {
        self.rules.fen()
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.rules.is_over()
    }

    /// Read access to the rules engine, for cosmetic queries only.
    pub fn rules(&self) -> &dyn RulesEngine {
        self.rules.as_ref()
    }

    /// Whether a drag may begin from `square`: the game is running, it
    /// is the human's turn, and the piece is the human's.
    pub fn can_pick_up(&self, square: Square) -> bool {
        !self.rules.is_over()
            && self.rules.turn() == self.human
            && self.rules.piece_color_at(square) == Some(self.human)
    }

    /// Validates and plays one human move, then awaits the automated
    /// reply when one is due.
    ///
    /// Preconditions are checked before the rules engine is consulted:
    /// the game must be running, it must be the human's turn, and the
    /// piece on `from` must be the human's. The human move is fully
    /// committed before the engine request goes out, and the reply is
    /// applied through the same acceptance path without ever triggering
    /// a further automated turn.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] naming why the move was turned away; the
    /// caller recovers by snapping the piece back.
    #[instrument(skip(self), fields(from = %from, to = %to))]
    pub async fn submit_human_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Promotion,
    ) -> Result<MoveOutcome, Rejection> {
        if self.rules.is_over() {
            return Err(Rejection::GameOver);
        }
        if self.rules.turn() != self.human {
            return Err(Rejection::NotHumanTurn);
        }
        if self.rules.piece_color_at(from) != Some(self.human) {
            return Err(Rejection::NotHumanPiece);
        }

        let candidate = CandidateMove::new(from, to, Some(promotion));
        let applied = self.rules.apply(candidate).ok_or(Rejection::Illegal)?;
        let outcome = self.commit(applied);

        if !self.rules.is_over() && self.rules.turn() != self.human {
            self.automated_reply().await;
        }

        Ok(outcome)
    }

    /// Requests and applies the automated side's reply.
    ///
    /// On a missing or unusable reply the position stays as it is: no
    /// record, no cue, only the engine-unavailable status notice.
    async fn automated_reply(&mut self) {
        let fen = self.rules.fen();
        debug!(%fen, depth = self.search_depth, "requesting automated reply");

        let Some(candidate) = self
            .engine
            .request_best_move(&fen, self.search_depth)
            .await
        else {
            warn!("no reply from engine, position unchanged");
            let _ = self
                .tx
                .send(PuzzleEvent::Status(ENGINE_UNAVAILABLE_STATUS.to_string()));
            return;
        };

        match self.rules.apply(candidate) {
            Some(applied) => {
                info!(reply = %candidate, "applied automated reply");
                self.commit(applied);
            }
            None => {
                warn!(reply = %candidate, "engine proposed an illegal move, position unchanged");
                let _ = self
                    .tx
                    .send(PuzzleEvent::Status(ENGINE_UNAVAILABLE_STATUS.to_string()));
            }
        }
    }

    /// Acceptance path shared by human and automated moves: append the
    /// record, publish the position, fire the cue, announce status.
    fn commit(&mut self, applied: AppliedMove) -> MoveOutcome {
        let record = MoveRecord::new(self.history.len() as u32 + 1, applied.from, applied.to);
        self.history.push(record);
        let _ = self.tx.send(PuzzleEvent::MoveRecorded(record));

        let resulting_position = self.rules.fen();
        let _ = self
            .tx
            .send(PuzzleEvent::Position(resulting_position.clone()));

        let is_over = self.rules.is_over();
        let is_check = self.rules.is_check();
        self.feedback.dispatch(applied.captured, is_over, is_check);
        self.narrator.announce(self.rules.turn(), is_over, is_check);

        MoveOutcome {
            captured: applied.captured,
            resulting_position,
        }
    }
}
