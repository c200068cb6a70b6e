//! Audio cue selection for applied moves.

use crate::events::PuzzleEvent;
use tokio::sync::mpsc;
use tracing::debug;

/// Audio cue accompanying an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Plain move.
    Move,
    /// A piece was captured.
    Capture,
    /// The moving side gave check.
    Check,
    /// The game ended.
    Checkmate,
}

/// Selects the single cue for an applied move.
///
/// Strict priority: game over beats check beats capture beats plain move.
pub fn select_cue(captured: bool, is_over: bool, is_check: bool) -> Cue {
    if is_over {
        Cue::Checkmate
    } else if is_check {
        Cue::Check
    } else if captured {
        Cue::Capture
    } else {
        Cue::Move
    }
}

/// Emits exactly one cue per applied move, none for rejections.
///
/// Cues are fire-and-forget; rapid successive moves may overlap and no
/// mutual exclusion is attempted. Owned by the puzzle session, not
/// process-wide.
#[derive(Debug, Clone)]
pub struct FeedbackDispatcher {
    tx: mpsc::UnboundedSender<PuzzleEvent>,
}

impl FeedbackDispatcher {
    /// Creates a dispatcher publishing on the session's event channel.
    pub fn new(tx: mpsc::UnboundedSender<PuzzleEvent>) -> Self {
        Self { tx }
    }

    /// Picks and fires the cue for one applied move.
    pub fn dispatch(&self, captured: bool, is_over: bool, is_check: bool) {
        let cue = select_cue(captured, is_over, is_check);
        debug!(?cue, "dispatching feedback cue");
        let _ = self.tx.send(PuzzleEvent::Cue(cue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_priority_is_over_check_capture_move() {
        assert_eq!(select_cue(true, true, true), Cue::Checkmate);
        assert_eq!(select_cue(true, false, true), Cue::Check);
        assert_eq!(select_cue(true, false, false), Cue::Capture);
        assert_eq!(select_cue(false, false, false), Cue::Move);
    }

    #[test]
    fn dispatch_fires_exactly_one_cue() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = FeedbackDispatcher::new(tx);

        dispatcher.dispatch(true, false, false);

        assert_eq!(rx.try_recv().unwrap(), PuzzleEvent::Cue(Cue::Capture));
        assert!(rx.try_recv().is_err());
    }
}
