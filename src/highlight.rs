//! Legal-destination highlighting during hover.
//!
//! Purely cosmetic: the controller computes which squares to paint and
//! with which shade; it never touches game state.

use crate::events::PuzzleEvent;
use crate::rules::RulesEngine;
use crate::types::Square;
use derive_new::new;
use tokio::sync::mpsc;
use tracing::trace;

/// Highlight tint, chosen by the painted square's own checkerboard
/// parity, independent of whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    /// Tint for light squares.
    Light,
    /// Tint for dark squares.
    Dark,
}

impl Shade {
    /// Shade matching the square's own color.
    pub fn for_square(square: Square) -> Self {
        if square.is_dark() {
            Shade::Dark
        } else {
            Shade::Light
        }
    }
}

/// One square to paint, with its shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct SquareMark {
    /// Square to paint.
    pub square: Square,
    /// Tint to use.
    pub shade: Shade,
}

/// Computes and publishes hover highlights.
#[derive(Debug, Clone)]
pub struct HighlightController {
    tx: mpsc::UnboundedSender<PuzzleEvent>,
}

impl HighlightController {
    /// Creates a controller publishing on the session's event channel.
    pub fn new(tx: mpsc::UnboundedSender<PuzzleEvent>) -> Self {
        Self { tx }
    }

    /// Marks `square` and every legal destination from it.
    ///
    /// Emits nothing when the square has no moves.
    pub fn hover_enter(&self, square: Square, rules: &dyn RulesEngine) {
        let destinations = rules.destinations(square);
        if destinations.is_empty() {
            return;
        }

        let mut marks = Vec::with_capacity(destinations.len() + 1);
        marks.push(SquareMark::new(square, Shade::for_square(square)));
        for to in destinations {
            marks.push(SquareMark::new(to, Shade::for_square(to)));
        }

        trace!(square = %square, count = marks.len(), "painting highlights");
        let _ = self.tx.send(PuzzleEvent::Highlight(marks));
    }

    /// Clears every highlight. Safe to call when nothing is painted.
    pub fn hover_leave(&self) {
        let _ = self.tx.send(PuzzleEvent::ClearHighlights);
    }
}
