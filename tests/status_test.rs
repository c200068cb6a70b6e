//! Tests for debounced status narration.

use chess_puzzles::{Color, PuzzleEvent, StatusNarrator};
use std::time::Duration;
use tokio::sync::mpsc;

const WINDOW: Duration = Duration::from_millis(100);

fn status(event: PuzzleEvent) -> String {
    match event {
        PuzzleEvent::Status(text) => text,
        other => panic!("expected a status event, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn only_the_last_announce_in_a_window_is_observed() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut narrator = StatusNarrator::new(tx, WINDOW);

    narrator.announce(Color::White, false, false);
    narrator.announce(Color::Black, false, false);

    tokio::time::sleep(WINDOW * 3).await;
    assert_eq!(status(rx.try_recv().unwrap()), "Black to move");
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn the_window_resets_instead_of_accumulating() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut narrator = StatusNarrator::new(tx, WINDOW);

    narrator.announce(Color::White, false, false);
    tokio::time::sleep(Duration::from_millis(60)).await;
    narrator.announce(Color::Black, false, false);

    // 140ms after the first announce: had the first timer survived, it
    // would have fired at 100ms. The re-armed timer fires at 160ms.
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(rx.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(status(rx.try_recv().unwrap()), "Black to move");
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn spaced_announces_each_emit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut narrator = StatusNarrator::new(tx, WINDOW);

    narrator.announce(Color::White, false, false);
    tokio::time::sleep(WINDOW * 2).await;
    narrator.announce(Color::Black, false, true);
    tokio::time::sleep(WINDOW * 2).await;

    assert_eq!(status(rx.try_recv().unwrap()), "White to move");
    assert_eq!(
        status(rx.try_recv().unwrap()),
        "Black to move, Black is in check"
    );
}

#[tokio::test(start_paused = true)]
async fn game_over_outranks_the_check_annotation() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut narrator = StatusNarrator::new(tx, WINDOW);

    narrator.announce(Color::Black, true, true);
    tokio::time::sleep(WINDOW * 2).await;

    assert_eq!(status(rx.try_recv().unwrap()), "Game over");
}

#[tokio::test(start_paused = true)]
async fn teardown_discards_the_pending_status() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut narrator = StatusNarrator::new(tx, WINDOW);

    narrator.announce(Color::White, false, false);
    drop(narrator);

    tokio::time::sleep(WINDOW * 3).await;
    assert!(rx.try_recv().is_err());
}
