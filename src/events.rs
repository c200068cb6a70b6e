//! Events published by the controller for the board view to render.
//!
//! The board view (web page, TUI, test harness) is an external
//! collaborator: it consumes these events and renders whatever state
//! they carry. Sends are fire-and-forget over an unbounded channel; a
//! departed consumer is not an error.

use crate::feedback::Cue;
use crate::highlight::SquareMark;
use crate::types::MoveRecord;

/// One rendering instruction for the board view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// Force the displayed position to this FEN.
    Position(String),
    /// A move was appended to the game log.
    MoveRecorded(MoveRecord),
    /// Current status line.
    Status(String),
    /// Play an audio cue.
    Cue(Cue),
    /// Paint these squares as legal-move highlights.
    Highlight(Vec<SquareMark>),
    /// Remove every highlight, whether or not any are painted.
    ClearHighlights,
}
