//! Core domain types shared across the puzzle controller.

use derive_more::{Display, Error};
use derive_new::new;
use std::str::FromStr;
use strum::EnumString;

/// Side in a chess game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Color {
    /// White pieces.
    White,
    /// Black pieces.
    Black,
}

impl Color {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// A board square identified by file and rank.
///
/// Files run `a`-`h`, ranks `1`-`8`; parsed from and displayed in
/// algebraic notation (`"e4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from zero-based file and rank indices.
    ///
    /// Returns `None` when either index is outside `0..8`.
    pub fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Zero-based file index (`a` = 0).
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank 1 = 0).
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Checkerboard parity of the square itself (`a1` is dark).
    pub fn is_dark(&self) -> bool {
        (self.file + self.rank) % 2 == 0
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'1' + self.rank) as char
        )
    }
}

/// Error parsing a square from algebraic notation.
#[derive(Debug, Clone, Display, Error)]
#[display("invalid square: {text:?}")]
pub struct ParseSquareError {
    /// The rejected input.
    pub text: String,
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() == 2
            && (b'a'..=b'h').contains(&bytes[0])
            && (b'1'..=b'8').contains(&bytes[1])
        {
            Ok(Self {
                file: bytes[0] - b'a',
                rank: bytes[1] - b'1',
            })
        } else {
            Err(ParseSquareError {
                text: s.to_string(),
            })
        }
    }
}

/// Piece a pawn promotes to. The UI owns the current choice and passes
/// it with each submitted move, so changing it mid-turn is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Promotion {
    /// Promote to queen (default).
    #[default]
    #[strum(serialize = "q", serialize = "queen")]
    Queen,
    /// Promote to rook.
    #[strum(serialize = "r", serialize = "rook")]
    Rook,
    /// Promote to bishop.
    #[strum(serialize = "b", serialize = "bishop")]
    Bishop,
    /// Promote to knight.
    #[strum(serialize = "n", serialize = "knight")]
    Knight,
}

impl Promotion {
    /// UCI promotion letter.
    pub fn uci_char(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }

    /// Parses a UCI promotion letter.
    pub fn from_uci(c: char) -> Option<Self> {
        match c {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }
}

/// A move proposed for application, before the rules engine has seen it.
///
/// `promotion` is the piece to promote to if the move turns out to be a
/// promotion; it is ignored otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct CandidateMove {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Promotion piece, when the move promotes.
    pub promotion: Option<Promotion>,
}

impl std::fmt::Display for CandidateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.uci_char())?;
        }
        Ok(())
    }
}

/// One applied move in the game log. Records are append-only and never
/// reordered; `ordinal` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct MoveRecord {
    /// 1-based position in the game log.
    pub ordinal: u32,
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
}

/// Result of a successfully applied human move. Transient; not retained
/// by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether the move captured a piece.
    pub captured: bool,
    /// FEN of the position after the move.
    pub resulting_position: String,
}

/// Why a submitted human move was turned away. The board view recovers
/// by snapping the dragged piece back; no game state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum Rejection {
    /// The game has already ended.
    #[display("the game is already over")]
    GameOver,
    /// It is the automated side's turn.
    #[display("it is not your turn")]
    NotHumanTurn,
    /// The piece on the source square is not the human's.
    #[display("that piece is not yours to move")]
    NotHumanPiece,
    /// The rules engine refused the move.
    #[display("illegal move")]
    Illegal,
}
