//! Chess puzzle interaction controller.
//!
//! A user solves a fixed puzzle against an automated opponent: they play
//! the side to move of the puzzle's starting FEN, and after each legal
//! move an external engine service supplies the reply.
//!
//! # Architecture
//!
//! - **Session**: one [`PuzzleSession`] per puzzle screen, parameterized
//!   by a [`PuzzleDefinition`]
//! - **Orchestrator**: owns the game state and sequences human and
//!   automated turns
//! - **Engine**: HTTP client for the remote move-search service
//! - **Rules**: legality and termination, behind the [`RulesEngine`] seam
//!
//! The board view is an external collaborator: it calls in with gestures
//! and renders the [`PuzzleEvent`]s published on the session's channel.
//!
//! # Example
//!
//! ```no_run
//! use chess_puzzles::{EngineConfig, PuzzleDefinition, PuzzleSession,
//!     SessionOptions, StockfishClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let puzzle = PuzzleDefinition::from_file("puzzles/the_mighty_knight.toml")?;
//! let engine = Arc::new(StockfishClient::new(EngineConfig::new(
//!     "https://reactchess.onrender.com/stockfish",
//! )));
//! let (mut session, mut events) =
//!     PuzzleSession::open(puzzle, engine, SessionOptions::default())?;
//!
//! let outcome = session
//!     .submit_human_move("h2".parse()?, "h3".parse()?, Default::default())
//!     .await?;
//! println!("position after reply: {}", session.position());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod engine;
mod events;
mod feedback;
mod highlight;
mod orchestrator;
mod puzzle;
mod rules;
mod session;
mod status;
mod types;

// Crate-level exports - Engine service client
pub use engine::{DEFAULT_SEARCH_DEPTH, EngineClient, EngineConfig, StockfishClient, parse_reply};

// Crate-level exports - Board view contract
pub use events::PuzzleEvent;

// Crate-level exports - Feedback cues
pub use feedback::{Cue, FeedbackDispatcher, select_cue};

// Crate-level exports - Highlighting
pub use highlight::{HighlightController, Shade, SquareMark};

// Crate-level exports - Orchestration
pub use orchestrator::{ENGINE_UNAVAILABLE_STATUS, MoveOrchestrator, SessionOptions};

// Crate-level exports - Puzzle definitions
pub use puzzle::{PuzzleDefinition, PuzzleError};

// Crate-level exports - Rules seam
pub use rules::{AppliedMove, RulesEngine, RulesError, ShakmatyRules};

// Crate-level exports - Session
pub use session::PuzzleSession;

// Crate-level exports - Status narration
pub use status::{DEFAULT_STATUS_WINDOW, StatusNarrator, compute_status};

// Crate-level exports - Core types
pub use types::{
    CandidateMove, Color, MoveOutcome, MoveRecord, ParseSquareError, Promotion, Rejection, Square,
};
