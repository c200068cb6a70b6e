//! Status narration: human-readable game status, debounced.

use crate::events::PuzzleEvent;
use crate::types::Color;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default debounce window for status emission.
pub const DEFAULT_STATUS_WINDOW: Duration = Duration::from_millis(100);

/// Derives the status line from the game state.
///
/// Game over wins over everything; otherwise the side to move, with a
/// check annotation when that side is in check.
pub fn compute_status(turn: Color, is_over: bool, is_check: bool) -> String {
    if is_over {
        return "Game over".to_string();
    }
    let mut status = format!("{} to move", turn);
    if is_check {
        status.push_str(&format!(", {} is in check", turn));
    }
    status
}

/// Emits status lines on the event channel, rate-limited.
///
/// Each `announce` re-arms a single pending emission: a second call
/// inside the window aborts the first, so only the last call's text is
/// observed. The timer resets on every call, it never accumulates. This
/// keeps a human move followed immediately by the automated reply from
/// flashing an intermediate status.
#[derive(Debug)]
pub struct StatusNarrator {
    window: Duration,
    tx: mpsc::UnboundedSender<PuzzleEvent>,
    pending: Option<JoinHandle<()>>,
}

impl StatusNarrator {
    /// Creates a narrator publishing on the session's event channel.
    pub fn new(tx: mpsc::UnboundedSender<PuzzleEvent>, window: Duration) -> Self {
        Self {
            window,
            tx,
            pending: None,
        }
    }

    /// Computes the status for the given state and schedules its emission.
    pub fn announce(&mut self, turn: Color, is_over: bool, is_check: bool) {
        let status = compute_status(turn, is_over, is_check);
        debug!(%status, "scheduling status emission");

        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let tx = self.tx.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = tx.send(PuzzleEvent::Status(status));
        }));
    }
}

impl Drop for StatusNarrator {
    fn drop(&mut self) {
        // A status arriving after teardown must not be observed.
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
