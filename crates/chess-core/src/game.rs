//! Turn sequencing and game-over detection
//!
//! [`ChessGame`] owns one [`Board`] and a [`GameTurn`]. Moves are only
//! accepted while a color is to move; a successful move flips the turn
//! unless it captured a king, which finishes the game for good. Failed
//! validation surfaces the error and changes nothing.

use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::piece::{Color, Piece};
use crate::square::Square;

/// The game state machine: ready, one of the two colors to move, or
/// finished after a king capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GameTurn {
    Ready,
    White,
    Black,
    Finished,
}

impl GameTurn {
    /// The color to move, if the game is running.
    pub fn color(self) -> Option<Color> {
        match self {
            GameTurn::White => Some(Color::White),
            GameTurn::Black => Some(Color::Black),
            GameTurn::Ready | GameTurn::Finished => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameTurn::Ready => "ready",
            GameTurn::White => "white",
            GameTurn::Black => "black",
            GameTurn::Finished => "finished",
        }
    }

    /// Inverse of [`GameTurn::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ready" => Some(GameTurn::Ready),
            "white" => Some(GameTurn::White),
            "black" => Some(GameTurn::Black),
            "finished" => Some(GameTurn::Finished),
            _ => None,
        }
    }
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The piece removed from the target square, if the move captured.
    pub captured: Option<Piece>,
    /// True when the captured piece was a king and the game is now over.
    pub finished: bool,
}

/// A chess game over a standard initial board.
#[derive(Debug, Clone)]
pub struct ChessGame {
    board: Board,
    turn: GameTurn,
}

impl ChessGame {
    /// A fresh game. It rejects moves until [`ChessGame::start`] is called.
    pub fn new() -> Self {
        ChessGame {
            board: Board::standard(),
            turn: GameTurn::Ready,
        }
    }

    /// Restores a game from persisted state.
    pub fn from_parts(board: Board, turn: GameTurn) -> Self {
        ChessGame { board, turn }
    }

    /// Begins the game with white to move. No-op on a game already under
    /// way, so re-entering a stored session cannot skip a turn.
    pub fn start(&mut self) {
        if self.turn == GameTurn::Ready {
            self.turn = GameTurn::White;
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> GameTurn {
        self.turn
    }

    pub fn is_finished(&self) -> bool {
        self.turn == GameTurn::Finished
    }

    /// True once the game has left the ready state.
    pub fn is_in_game(&self) -> bool {
        self.turn != GameTurn::Ready
    }

    /// Attempts to move the piece on `source` to `target` for the side to
    /// move.
    ///
    /// On success the turn flips, or the game finishes if a king was
    /// captured. On failure the board and turn are exactly as before.
    pub fn move_piece(&mut self, source: Square, target: Square) -> ChessResult<MoveOutcome> {
        let mover = match self.turn {
            GameTurn::Ready => return Err(ChessError::NotStarted),
            GameTurn::Finished => return Err(ChessError::GameFinished),
            GameTurn::White => Color::White,
            GameTurn::Black => Color::Black,
        };

        if !self.board.is_right_turn(source, mover) {
            return match self.board.piece_at(source) {
                None => Err(ChessError::NoPieceAtSource { square: source }),
                Some(_) => Err(ChessError::WrongTurn { turn: mover }),
            };
        }

        self.board.check_can_move(source, target)?;

        let king_captured = self.board.is_king(target);
        let captured = self.board.apply_move(source, target);
        self.turn = if king_captured {
            GameTurn::Finished
        } else {
            match mover {
                Color::White => GameTurn::Black,
                Color::Black => GameTurn::White,
            }
        };

        Ok(MoveOutcome {
            captured,
            finished: king_captured,
        })
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame::new()
    }
}
