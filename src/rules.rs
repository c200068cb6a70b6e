//! Rules engine seam and the `shakmaty`-backed adapter.
//!
//! The controller never implements chess rules itself; it talks to a
//! [`RulesEngine`] that owns the position and answers legality, turn,
//! check, and termination questions.

use crate::types::{CandidateMove, Color, Promotion, Square};
use derive_more::{Display, Error};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position, Role};
use tracing::instrument;

/// A move the rules engine has accepted and played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Whether a piece was captured.
    pub captured: bool,
}

/// External rules authority: holds the current position and is the only
/// judge of legality. Assumed correct; never second-guessed.
pub trait RulesEngine: Send {
    /// Plays `mv` if it is legal in the current position.
    ///
    /// Returns `None` for an illegal move, leaving the position unchanged.
    fn apply(&mut self, mv: CandidateMove) -> Option<AppliedMove>;

    /// Whether the game has ended (mate, stalemate, or dead position).
    fn is_over(&self) -> bool;

    /// Whether the side to move is in check.
    fn is_check(&self) -> bool;

    /// Side to move.
    fn turn(&self) -> Color;

    /// Current position as a FEN string.
    fn fen(&self) -> String;

    /// Color of the piece on `square`, if any.
    fn piece_color_at(&self, square: Square) -> Option<Color>;

    /// Legal destination squares for the piece on `from`. Empty when the
    /// square is empty or the piece has no moves.
    fn destinations(&self, from: Square) -> Vec<Square>;
}

/// Error constructing a rules engine from a starting position.
#[derive(Debug, Clone, Display, Error)]
#[display("Rules error: {} at {}:{}", message, file, line)]
pub struct RulesError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RulesError {
    /// Creates a new rules error with caller location tracking.
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

/// Rules engine backed by the `shakmaty` crate.
#[derive(Debug, Clone)]
pub struct ShakmatyRules {
    pos: Chess,
}

impl ShakmatyRules {
    /// Builds a rules engine from a starting FEN.
    #[instrument]
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|e| RulesError::new(format!("invalid FEN: {}", e)))?;
        let pos = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::new(format!("unplayable position: {}", e)))?;
        Ok(Self { pos })
    }
}

fn to_shakmaty(sq: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        shakmaty::File::new(u32::from(sq.file())),
        shakmaty::Rank::new(u32::from(sq.rank())),
    )
}

fn from_shakmaty(sq: shakmaty::Square) -> Square {
    Square::from_coords(u32::from(sq.file()) as u8, u32::from(sq.rank()) as u8)
        .expect("shakmaty squares are always on the board")
}

fn from_shakmaty_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn promotion_role(p: Promotion) -> Role {
    match p {
        Promotion::Queen => Role::Queen,
        Promotion::Rook => Role::Rook,
        Promotion::Bishop => Role::Bishop,
        Promotion::Knight => Role::Knight,
    }
}

impl RulesEngine for ShakmatyRules {
    fn apply(&mut self, mv: CandidateMove) -> Option<AppliedMove> {
        let from = to_shakmaty(mv.from);
        let to = to_shakmaty(mv.to);
        let want = mv.promotion.map(promotion_role);

        let chosen = self.pos.legal_moves().into_iter().find(|m| {
            m.from() == Some(from)
                && m.to() == to
                && match m.promotion() {
                    // Non-promotion moves ignore the promotion choice.
                    None => true,
                    Some(role) => want == Some(role),
                }
        })?;

        let captured = chosen.is_capture();
        self.pos.play_unchecked(&chosen);
        Some(AppliedMove {
            from: mv.from,
            to: mv.to,
            captured,
        })
    }

    fn is_over(&self) -> bool {
        self.pos.is_game_over()
    }

    fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    fn turn(&self) -> Color {
        from_shakmaty_color(self.pos.turn())
    }

    fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    fn piece_color_at(&self, square: Square) -> Option<Color> {
        self.pos
            .board()
            .piece_at(to_shakmaty(square))
            .map(|piece| from_shakmaty_color(piece.color))
    }

    fn destinations(&self, from: Square) -> Vec<Square> {
        let from = to_shakmaty(from);
        let mut out = Vec::new();
        for m in self.pos.legal_moves() {
            if m.from() == Some(from) {
                let to = from_shakmaty(m.to());
                // Promotion moves repeat the destination once per role.
                if !out.contains(&to) {
                    out.push(to);
                }
            }
        }
        out
    }
}
