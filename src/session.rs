//! One puzzle session: the interaction controller for a single screen.
//!
//! Generalizes the per-puzzle screens into a single controller
//! parameterized by a [`PuzzleDefinition`]. The board view calls in with
//! gestures (drops, hovers) and renders the [`PuzzleEvent`]s that come
//! back out.

use crate::engine::EngineClient;
use crate::events::PuzzleEvent;
use crate::highlight::HighlightController;
use crate::orchestrator::{MoveOrchestrator, SessionOptions};
use crate::puzzle::PuzzleDefinition;
use crate::rules::{RulesEngine, RulesError, ShakmatyRules};
use crate::types::{Color, MoveOutcome, MoveRecord, Promotion, Rejection, Square};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Interaction controller for one puzzle.
///
/// Owns the orchestrator (and through it the game state) and the
/// highlight controller. Dropping the session is teardown: a pending
/// engine reply is discarded with the suspended call instead of
/// mutating state after the fact.
pub struct PuzzleSession {
    definition: PuzzleDefinition,
    orchestrator: MoveOrchestrator,
    highlights: HighlightController,
}

impl PuzzleSession {
    /// Opens a session for `definition`, judging legality with the
    /// `shakmaty`-backed rules engine.
    ///
    /// Returns the session and the receiving end of its event channel.
    ///
    /// # Errors
    ///
    /// Fails when the definition's FEN does not describe a playable
    /// position.
    #[instrument(skip(definition, engine), fields(puzzle = %definition.name()))]
    pub fn open(
        definition: PuzzleDefinition,
        engine: Arc<dyn EngineClient>,
        options: SessionOptions,
    ) -> Result<(Self, mpsc::UnboundedReceiver<PuzzleEvent>), RulesError> {
        let rules = ShakmatyRules::from_fen(definition.fen())?;
        Ok(Self::with_rules(definition, Box::new(rules), engine, options))
    }

    /// Opens a session over an already-constructed rules engine.
    pub fn with_rules(
        definition: PuzzleDefinition,
        rules: Box<dyn RulesEngine>,
        engine: Arc<dyn EngineClient>,
        options: SessionOptions,
    ) -> (Self, mpsc::UnboundedReceiver<PuzzleEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let orchestrator = MoveOrchestrator::new(rules, engine, &options, tx.clone());
        let highlights = HighlightController::new(tx);
        info!(puzzle = %definition.name(), human = %orchestrator.human_side(), "session open");
        (
            Self {
                definition,
                orchestrator,
                highlights,
            },
            rx,
        )
    }

    /// The puzzle this session plays.
    pub fn definition(&self) -> &PuzzleDefinition {
        &self.definition
    }

    /// Side the human plays.
    pub fn human_side(&self) -> Color {
        self.orchestrator.human_side()
    }

    /// Current position as FEN, for snap-end re-rendering.
    pub fn position(&self) -> String {
        self.orchestrator.position()
    }

    /// The game log so far.
    pub fn history(&self) -> &[MoveRecord] {
        self.orchestrator.history()
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.orchestrator.is_over()
    }

    /// Drag-start gate for the board view.
    pub fn can_pick_up(&self, square: Square) -> bool {
        self.orchestrator.can_pick_up(square)
    }

    /// Submits a dropped move. See [`MoveOrchestrator::submit_human_move`].
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] the board view answers with a snapback.
    pub async fn submit_human_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Promotion,
    ) -> Result<MoveOutcome, Rejection> {
        self.orchestrator.submit_human_move(from, to, promotion).await
    }

    /// Hover entered a square: paint its legal destinations.
    pub fn hover_enter(&self, square: Square) {
        self.highlights.hover_enter(square, self.orchestrator.rules());
    }

    /// Hover left: clear every highlight.
    pub fn hover_leave(&self) {
        self.highlights.hover_leave();
    }
}
