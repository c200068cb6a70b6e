//! Chess Puzzles - terminal front end
//!
//! Stands in for the puzzle web page: reads moves and hover commands
//! from stdin and renders the controller's events as text.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use chess_puzzles::{
    Cue, EngineConfig, Promotion, PuzzleDefinition, PuzzleEvent, PuzzleSession, SessionOptions,
    Square, StockfishClient,
};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Engine service the original puzzle screens talked to.
const DEFAULT_ENGINE_URL: &str = "https://reactchess.onrender.com/stockfish";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            puzzle,
            engine_url,
            depth,
        } => run_play(&puzzle, engine_url, depth).await,
        Command::Show { puzzle } => run_show(&puzzle),
    }
}

/// Print a puzzle's metadata.
fn run_show(path: &Path) -> Result<()> {
    let puzzle = PuzzleDefinition::from_file(path)?;
    println!("{}", puzzle.name());
    println!("position: {}", puzzle.fen());
    if !puzzle.description().is_empty() {
        println!("\n{}", puzzle.description());
    }
    if let Some(video) = puzzle.video_url() {
        println!("\nwalkthrough: {}", video);
    }
    Ok(())
}

/// Play a puzzle interactively.
async fn run_play(path: &Path, engine_url: Option<String>, depth: u32) -> Result<()> {
    let puzzle = PuzzleDefinition::from_file(path)?;
    let url = engine_url
        .or_else(|| std::env::var("ENGINE_URL").ok())
        .unwrap_or_else(|| DEFAULT_ENGINE_URL.to_string());

    info!(puzzle = %puzzle.name(), engine = %url, depth, "starting puzzle");

    let engine = Arc::new(StockfishClient::new(EngineConfig::new(url)));
    let options = SessionOptions {
        search_depth: depth,
        ..SessionOptions::default()
    };
    let (mut session, mut events) = PuzzleSession::open(puzzle, engine, options)?;

    println!("{}", session.definition().name());
    println!("You play {}. Position: {}", session.human_side(), session.position());
    println!("Enter moves as UCI (e2e4, a7a8q); also: hover <sq>, clear, promote <piece>, fen, quit");

    // Render events as they arrive; the session keeps playing meanwhile.
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                PuzzleEvent::Position(fen) => println!("  position: {}", fen),
                PuzzleEvent::MoveRecorded(record) => {
                    println!("  {}. {} -> {}", record.ordinal, record.from, record.to);
                }
                PuzzleEvent::Status(status) => println!("  status: {}", status),
                PuzzleEvent::Cue(cue) => println!("  ({})", cue_label(cue)),
                PuzzleEvent::Highlight(marks) => {
                    let squares: Vec<String> =
                        marks.iter().map(|m| m.square.to_string()).collect();
                    println!("  highlight: {}", squares.join(" "));
                }
                PuzzleEvent::ClearHighlights => println!("  highlight: (cleared)"),
            }
        }
    });

    let mut promotion = Promotion::default();
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["quit"] | ["exit"] => break,
            ["fen"] => println!("  position: {}", session.position()),
            ["clear"] => session.hover_leave(),
            ["hover", square] => match square.parse::<Square>() {
                Ok(square) => session.hover_enter(square),
                Err(e) => println!("  {}", e),
            },
            ["promote", piece] => match piece.parse::<Promotion>() {
                Ok(choice) => {
                    promotion = choice;
                    println!("  promoting to {}", promotion.uci_char());
                }
                Err(_) => println!("  unknown piece: {}", piece),
            },
            [token] => submit(&mut session, token, promotion).await,
            _ => println!("  unrecognized command: {}", input),
        }

        if session.is_over() {
            println!("Game over after {} moves.", session.history().len());
            break;
        }
    }

    Ok(())
}

/// Parse a UCI move token and submit it as the human move.
async fn submit(session: &mut PuzzleSession, token: &str, promotion: Promotion) {
    if !(4..=5).contains(&token.len()) {
        println!("  unrecognized command: {}", token);
        return;
    }
    let (Some(Ok(from)), Some(Ok(to))) = (
        token.get(0..2).map(str::parse::<Square>),
        token.get(2..4).map(str::parse::<Square>),
    ) else {
        println!("  unrecognized move: {}", token);
        return;
    };
    // A promotion letter on the move itself overrides the standing choice.
    let promotion = token
        .chars()
        .nth(4)
        .and_then(Promotion::from_uci)
        .unwrap_or(promotion);

    if let Err(rejection) = session.submit_human_move(from, to, promotion).await {
        println!("  snapback: {}", rejection);
    }
}

fn cue_label(cue: Cue) -> &'static str {
    match cue {
        Cue::Move => "move",
        Cue::Capture => "capture!",
        Cue::Check => "check!",
        Cue::Checkmate => "checkmate!",
    }
}
