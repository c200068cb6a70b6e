//! Puzzle definitions: static data describing one puzzle screen.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Static description of one puzzle. Immutable after load; the human
/// plays the side to move of `fen`.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    /// Display title.
    name: String,

    /// Starting position.
    fen: String,

    /// Narrative text shown alongside the board.
    #[serde(default)]
    description: String,

    /// Optional walkthrough video.
    #[serde(default)]
    video_url: Option<String>,

    /// Optional solution text.
    #[serde(default)]
    solution: Option<String>,
}

impl PuzzleDefinition {
    /// Creates a definition from a name and starting FEN.
    pub fn new(name: impl Into<String>, fen: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fen: fen.into(),
            description: String::new(),
            video_url: None,
            solution: None,
        }
    }

    /// Loads a definition from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        debug!("loading puzzle definition");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PuzzleError::new(format!("failed to read puzzle file: {}", e)))?;

        let definition: Self = toml::from_str(&content)
            .map_err(|e| PuzzleError::new(format!("failed to parse puzzle file: {}", e)))?;

        info!(name = %definition.name, "puzzle definition loaded");
        Ok(definition)
    }
}

/// Puzzle definition error.
#[derive(Debug, Clone, Display, Error)]
#[display("Puzzle error: {} at {}:{}", message, file, line)]
pub struct PuzzleError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PuzzleError {
    /// Creates a new puzzle error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
