//! Chess rule engine
//!
//! The move-legality core of the webchess workspace: squares and
//! directions, per-piece movement rules, a board that validates and
//! executes moves, the turn state machine, and material scoring. The
//! crate does no I/O and no logging; presentation and persistence live in
//! the workspace's console client and `backend` crate.
//!
//! The sole game-over condition is capturing a king. There is no check,
//! checkmate or stalemate detection, no castling, no en passant and no
//! promotion.
//!
//! ```
//! use chess_core::{ChessGame, GameTurn};
//!
//! let mut game = ChessGame::new();
//! game.start();
//! game.move_piece("e2".parse()?, "e4".parse()?)?;
//! assert_eq!(game.turn(), GameTurn::Black);
//! # Ok::<(), chess_core::ChessError>(())
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod piece;
pub mod score;
pub mod square;

pub use board::Board;
pub use error::{ChessError, ChessResult};
pub use game::{ChessGame, GameTurn, MoveOutcome};
pub use piece::{Color, Piece, PieceKind};
pub use score::{GameResult, Status};
pub use square::{Direction, Square};
