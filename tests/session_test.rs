//! End-to-end tests for the puzzle session controller.

use chess_puzzles::{
    CandidateMove, Color, EngineClient, Promotion, PuzzleDefinition, PuzzleEvent, PuzzleSession,
    Rejection, SessionOptions, Square, parse_reply,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

const BLATHY: &str = "8/8/8/2p5/1pp5/brpp4/qpprpK1P/1nkbn3 w - - 0 1";

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

struct FakeEngine {
    reply: Option<&'static str>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl FakeEngine {
    fn new(reply: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl EngineClient for FakeEngine {
    async fn request_best_move(&self, fen: &str, depth: u32) -> Option<CandidateMove> {
        self.calls.lock().unwrap().push((fen.to_string(), depth));
        self.reply.and_then(parse_reply)
    }
}

fn open(
    engine: Arc<FakeEngine>,
) -> (PuzzleSession, mpsc::UnboundedReceiver<PuzzleEvent>) {
    let definition = PuzzleDefinition::new("The Mighty Knight", BLATHY);
    let options = SessionOptions {
        search_depth: 10,
        status_window: Duration::from_millis(1),
    };
    PuzzleSession::open(definition, engine, options).unwrap()
}

#[tokio::test]
async fn the_human_plays_the_side_to_move() {
    let (session, _events) = open(FakeEngine::new(None));
    assert_eq!(session.human_side(), Color::White);
    assert_eq!(session.position(), BLATHY);
    assert!(session.history().is_empty());
    assert!(!session.is_over());
}

#[tokio::test]
async fn drag_gating_matches_ownership_and_turn() {
    let (session, _events) = open(FakeEngine::new(None));
    assert!(session.can_pick_up(sq("h2")));
    assert!(session.can_pick_up(sq("f2")));
    assert!(!session.can_pick_up(sq("a2")));
    assert!(!session.can_pick_up(sq("e5")));
}

#[tokio::test]
async fn a_rejected_drop_changes_nothing() {
    let engine = FakeEngine::new(None);
    let (mut session, mut events) = open(engine.clone());

    let result = session
        .submit_human_move(sq("a1"), sq("a2"), Promotion::Queen)
        .await;

    assert_eq!(result, Err(Rejection::NotHumanPiece));
    assert!(session.history().is_empty());
    assert!(engine.calls.lock().unwrap().is_empty());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn an_accepted_drop_commits_and_consults_the_engine() {
    let engine = FakeEngine::new(None);
    let (mut session, mut events) = open(engine.clone());

    let outcome = session
        .submit_human_move(sq("h2"), sq("h3"), Promotion::Queen)
        .await
        .unwrap();

    assert!(!outcome.captured);
    assert_eq!(outcome.resulting_position, session.position());
    assert_eq!(session.history().len(), 1);

    let calls = engine.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![(session.position(), 10)]);

    // The committed move reaches the board view.
    let mut saw_record = false;
    let mut saw_position = false;
    while let Ok(event) = events.try_recv() {
        match event {
            PuzzleEvent::MoveRecorded(record) => {
                saw_record = true;
                assert_eq!(record.ordinal, 1);
                assert_eq!(record.from, sq("h2"));
                assert_eq!(record.to, sq("h3"));
            }
            PuzzleEvent::Position(fen) => {
                saw_position = true;
                assert_eq!(fen, session.position());
            }
            _ => {}
        }
    }
    assert!(saw_record);
    assert!(saw_position);
}

#[tokio::test]
async fn the_engine_reply_is_played_for_the_automated_side() {
    // The e1 knight is the only black piece with a move here.
    let engine = FakeEngine::new(Some("bestmove e1f3"));
    let (mut session, _events) = open(engine.clone());

    session
        .submit_human_move(sq("h2"), sq("h3"), Promotion::Queen)
        .await
        .unwrap();

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history()[1].from, sq("e1"));
    assert_eq!(session.history()[1].to, sq("f3"));
    // Back to the human after exactly one automated reply.
    assert!(session.can_pick_up(sq("h3")));
    assert_eq!(engine.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn hovering_paints_and_clears_through_the_session() {
    let (session, mut events) = open(FakeEngine::new(None));

    session.hover_enter(sq("f2"));
    assert!(matches!(
        events.try_recv().unwrap(),
        PuzzleEvent::Highlight(_)
    ));

    session.hover_leave();
    assert_eq!(events.try_recv().unwrap(), PuzzleEvent::ClearHighlights);
}

#[tokio::test(start_paused = true)]
async fn the_debounced_status_arrives_after_the_window() {
    let engine = FakeEngine::new(None);
    let (mut session, mut events) = open(engine.clone());

    session
        .submit_human_move(sq("h2"), sq("h3"), Promotion::Queen)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let mut statuses = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let PuzzleEvent::Status(text) = event {
            statuses.push(text);
        }
    }
    // The engine-unavailable notice, then the debounced narration.
    assert!(statuses.iter().any(|s| s.contains("Engine unavailable")));
    assert!(statuses.iter().any(|s| s == "Black to move"));
}
