//! Command-line interface for chess_puzzles.

use clap::{Parser, Subcommand};

/// Chess Puzzles - play a fixed puzzle against an engine opponent
#[derive(Parser, Debug)]
#[command(name = "chess_puzzles")]
#[command(about = "Solve chess puzzles against a remote engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a puzzle interactively from the terminal
    Play {
        /// Path to the puzzle definition file
        #[arg(short, long, default_value = "puzzles/the_mighty_knight.toml")]
        puzzle: std::path::PathBuf,

        /// Engine service URL (falls back to the ENGINE_URL environment variable)
        #[arg(long)]
        engine_url: Option<String>,

        /// Engine search depth
        #[arg(long, default_value_t = chess_puzzles::DEFAULT_SEARCH_DEPTH)]
        depth: u32,
    },

    /// Print a puzzle's description without playing it
    Show {
        /// Path to the puzzle definition file
        #[arg(short, long, default_value = "puzzles/the_mighty_knight.toml")]
        puzzle: std::path::PathBuf,
    },
}
