//! Error types for the rule engine
//!
//! Every rejection a caller can hit is a variant here. Nothing in this
//! crate logs or panics on bad input; errors propagate unchanged and the
//! board is left untouched.

use thiserror::Error;

use crate::piece::{Color, Piece};
use crate::square::Square;

/// Errors raised by square parsing, move validation and the game state
/// machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Malformed or out-of-range square notation.
    #[error("invalid square {text:?}: expected a file a-h followed by a rank 1-8")]
    InvalidPosition { text: String },

    /// The source square is empty.
    #[error("no piece on {square}")]
    NoPieceAtSource { square: Square },

    /// The target square holds a piece of the moving side.
    #[error("{square} already holds one of your pieces")]
    FriendlyCapture { square: Square },

    /// The move vector is outside the piece's direction/distance set.
    #[error("{piece} cannot move from {from} to {to}")]
    InvalidPieceMove { piece: Piece, from: Square, to: Square },

    /// An intermediate square between source and target is occupied.
    #[error("the path from {from} to {to} is blocked at {blocked}")]
    PathBlocked {
        from: Square,
        to: Square,
        blocked: Square,
    },

    /// A piece of the side not to move was addressed.
    #[error("it is {turn}'s turn")]
    WrongTurn { turn: Color },

    /// A move was attempted before the game was started.
    #[error("the game has not started yet")]
    NotStarted,

    /// A move was attempted after a king was captured.
    #[error("the game is over, a king has been captured")]
    GameFinished,
}

impl ChessError {
    /// True for the rule-rejection family: a well-formed request that the
    /// current board or turn does not allow. Distinct from notation errors
    /// (`InvalidPosition`) and terminal-state errors (`NotStarted`,
    /// `GameFinished`).
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            ChessError::NoPieceAtSource { .. }
                | ChessError::FriendlyCapture { .. }
                | ChessError::InvalidPieceMove { .. }
                | ChessError::PathBlocked { .. }
                | ChessError::WrongTurn { .. }
        )
    }
}

/// Result type alias for rule engine operations
pub type ChessResult<T> = Result<T, ChessError>;
