//! Material scoring and game result
//!
//! [`Status`] is a transient computation over a borrowed board snapshot:
//! sum the base scores of one color's surviving pieces, then subtract half
//! a point per pawn on every file that holds more than one pawn of that
//! color.

use crate::board::Board;
use crate::piece::{Color, PieceKind};

/// Outcome of comparing both sides' material scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

/// Stateless judge over a borrowed board. Construct one per query.
pub struct Status<'a> {
    board: &'a Board,
}

impl<'a> Status<'a> {
    pub fn new(board: &'a Board) -> Self {
        Status { board }
    }

    /// Material score of one color.
    ///
    /// Doubled pawns are penalized per file: a file carrying `n > 1` pawns
    /// of this color loses `0.5 * n` from the total, not `0.5 * (n - 1)`.
    pub fn score(&self, color: Color) -> f64 {
        let survivors: Vec<_> = self.board.pieces_of(color).collect();
        let mut sum: f64 = survivors.iter().map(|(_, piece)| piece.kind.score()).sum();
        for file in 0..8u8 {
            let pawns = survivors
                .iter()
                .filter(|(square, piece)| {
                    piece.kind == PieceKind::Pawn && square.file() == file
                })
                .count();
            if pawns > 1 {
                sum -= 0.5 * pawns as f64;
            }
        }
        sum
    }

    /// Higher score wins; equal scores are a draw.
    pub fn result(&self) -> GameResult {
        let white = self.score(Color::White);
        let black = self.score(Color::Black);
        if white > black {
            GameResult::WhiteWins
        } else if black > white {
            GameResult::BlackWins
        } else {
            GameResult::Draw
        }
    }

    /// True once either king has been captured. King capture is the sole
    /// end condition; there is no checkmate or stalemate detection.
    pub fn is_game_over(&self) -> bool {
        !self.has_king(Color::White) || !self.has_king(Color::Black)
    }

    fn has_king(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .any(|(_, piece)| piece.kind == PieceKind::King)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn starting_position_scores_are_balanced() {
        let board = Board::standard();
        let status = Status::new(&board);
        // 8 pawns + 2 knights + 2 bishops + 2 rooks + queen, king at zero
        assert_eq!(status.score(Color::White), 38.0);
        assert_eq!(status.score(Color::Black), 38.0);
        assert_eq!(status.result(), GameResult::Draw);
        assert!(!status.is_game_over());
    }

    #[test]
    fn two_pawns_sharing_a_file_score_one_point() {
        let mut board = Board::empty();
        board.place(sq("a2"), Piece::new(Color::White, PieceKind::Pawn));
        board.place(sq("a3"), Piece::new(Color::White, PieceKind::Pawn));
        let status = Status::new(&board);
        assert_eq!(status.score(Color::White), 1.0);
    }

    #[test]
    fn the_penalty_counts_every_pawn_on_the_file() {
        let mut board = Board::empty();
        board.place(sq("b2"), Piece::new(Color::White, PieceKind::Pawn));
        board.place(sq("b4"), Piece::new(Color::White, PieceKind::Pawn));
        board.place(sq("b6"), Piece::new(Color::White, PieceKind::Pawn));
        let status = Status::new(&board);
        assert_eq!(status.score(Color::White), 1.5);
    }

    #[test]
    fn pawns_on_separate_files_are_not_penalized() {
        let mut board = Board::empty();
        board.place(sq("a2"), Piece::new(Color::White, PieceKind::Pawn));
        board.place(sq("b2"), Piece::new(Color::White, PieceKind::Pawn));
        let status = Status::new(&board);
        assert_eq!(status.score(Color::White), 2.0);
    }

    #[test]
    fn opposing_pawns_do_not_share_a_penalty() {
        let mut board = Board::empty();
        board.place(sq("c2"), Piece::new(Color::White, PieceKind::Pawn));
        board.place(sq("c7"), Piece::new(Color::Black, PieceKind::Pawn));
        let status = Status::new(&board);
        assert_eq!(status.score(Color::White), 1.0);
        assert_eq!(status.score(Color::Black), 1.0);
    }

    #[test]
    fn the_king_adds_nothing_to_the_score() {
        let mut board = Board::empty();
        board.place(sq("e1"), Piece::new(Color::White, PieceKind::King));
        board.place(sq("d1"), Piece::new(Color::White, PieceKind::Queen));
        let status = Status::new(&board);
        assert_eq!(status.score(Color::White), 9.0);
    }

    #[test]
    fn losing_material_decides_the_result() {
        let mut board = Board::standard();
        // white wins black's queen outright
        board.apply_move(sq("d1"), sq("d8"));
        let status = Status::new(&board);
        assert_eq!(status.result(), GameResult::WhiteWins);
    }

    #[test]
    fn a_missing_king_means_game_over() {
        let mut board = Board::standard();
        assert!(!Status::new(&board).is_game_over());
        board.apply_move(sq("e2"), sq("e8"));
        assert!(Status::new(&board).is_game_over());
    }
}
