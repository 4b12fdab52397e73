//! Board state and move validation
//!
//! [`Board`] owns the complete square-to-piece mapping as a flat array of
//! 64 optional pieces and is the single source of truth for occupancy.
//! Validation ([`Board::check_can_move`]) and execution
//! ([`Board::apply_move`]) are split: callers validate first and only then
//! mutate, so a rejected move can never leave the board half-updated.
//!
//! The obstruction check enumerates unit steps along the classified
//! direction strictly between source and target. A knight vector has no
//! classified direction and therefore no intermediate squares, which is
//! exactly what lets it jump.

use crate::error::{ChessError, ChessResult};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// An 8x8 board holding at most one piece per square.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard initial layout: white on ranks 1-2, black on ranks 7-8.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            let file = file as u8;
            board.squares[file as usize] = Some(Piece::new(Color::White, kind));
            board.squares[(7 * 8 + file) as usize] = Some(Piece::new(Color::Black, kind));
            board.squares[(8 + file) as usize] =
                Some(Piece::new(Color::White, PieceKind::Pawn));
            board.squares[(6 * 8 + file) as usize] =
                Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        board
    }

    /// Puts a piece on a square, replacing whatever was there.
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square.index()] = Some(piece);
    }

    /// The piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// True iff `square` holds a piece of `color`. Used by the turn check
    /// before any path computation happens.
    pub fn is_right_turn(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color == color)
    }

    /// True iff `square` holds a king of either color.
    pub fn is_king(&self, square: Square) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.kind == PieceKind::King)
    }

    /// Validates a move without executing it.
    ///
    /// Rejects, in order: an empty source square, a target held by the
    /// moving side, a vector outside the piece's direction/distance rule,
    /// and an occupied intermediate square. Turn ownership is the caller's
    /// concern.
    pub fn check_can_move(&self, source: Square, target: Square) -> ChessResult<()> {
        let piece = self
            .piece_at(source)
            .ok_or(ChessError::NoPieceAtSource { square: source })?;
        let target_piece = self.piece_at(target);
        if let Some(other) = target_piece {
            if other.color == piece.color {
                return Err(ChessError::FriendlyCapture { square: target });
            }
        }
        piece.accepts_vector(source, target, target_piece)?;
        self.check_path_clear(source, target)
    }

    /// Fails if any square strictly between source and target is occupied.
    /// Vectors with no classified direction (knight jumps) have no
    /// intermediate squares and pass trivially.
    fn check_path_clear(&self, source: Square, target: Square) -> ChessResult<()> {
        let Some(direction) = source.direction_to(target) else {
            return Ok(());
        };
        let (df, dr) = direction.step();
        let mut current = source;
        loop {
            current = match current.offset(df, dr) {
                Some(next) => next,
                None => return Ok(()),
            };
            if current == target {
                return Ok(());
            }
            if self.piece_at(current).is_some() {
                return Err(ChessError::PathBlocked {
                    from: source,
                    to: target,
                    blocked: current,
                });
            }
        }
    }

    /// Executes a validated move: removes any piece on `target` (the
    /// capture), relocates the source piece there and clears the source.
    /// Returns the captured piece.
    ///
    /// Does not re-validate; call [`Board::check_can_move`] first.
    pub fn apply_move(&mut self, source: Square, target: Square) -> Option<Piece> {
        let piece = self.squares[source.index()].take();
        std::mem::replace(&mut self.squares[target.index()], piece)
    }

    /// All surviving pieces of one color with their squares.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| match self.piece_at(square) {
            Some(piece) if piece.color == color => Some((square, piece)),
            _ => None,
        })
    }

    /// Every square the piece on `source` can currently move to.
    pub fn available_targets(&self, source: Square) -> ChessResult<Vec<Square>> {
        if self.piece_at(source).is_none() {
            return Err(ChessError::NoPieceAtSource { square: source });
        }
        Ok(Square::all()
            .filter(|&target| self.check_can_move(source, target).is_ok())
            .collect())
    }

    /// All 64 squares with their occupants, in index order. This is the
    /// snapshot the presentation layers render from.
    pub fn squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::all().map(move |square| (square, self.piece_at(square)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn piece(color: Color, kind: PieceKind) -> Piece {
        Piece::new(color, kind)
    }

    #[test]
    fn standard_layout_has_thirty_two_pieces() {
        let board = Board::standard();
        let occupied = board.squares().filter(|(_, p)| p.is_some()).count();
        assert_eq!(occupied, 32);
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(piece(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(piece(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            board.piece_at(sq("a7")),
            Some(piece(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn empty_source_is_rejected() {
        let board = Board::standard();
        assert_eq!(
            board.check_can_move(sq("e4"), sq("e5")),
            Err(ChessError::NoPieceAtSource { square: sq("e4") })
        );
    }

    #[test]
    fn capturing_your_own_piece_is_rejected() {
        let board = Board::standard();
        assert_eq!(
            board.check_can_move(sq("a1"), sq("a2")),
            Err(ChessError::FriendlyCapture { square: sq("a2") })
        );
    }

    #[test]
    fn bishop_blocked_on_the_diagonal() {
        let board = Board::standard();
        let err = board.check_can_move(sq("f8"), sq("h6")).unwrap_err();
        assert_eq!(
            err,
            ChessError::PathBlocked {
                from: sq("f8"),
                to: sq("h6"),
                blocked: sq("g7"),
            }
        );
    }

    #[test]
    fn rejected_move_leaves_the_board_unchanged() {
        let mut board = Board::standard();
        let before = board.clone();
        assert!(board.check_can_move(sq("f8"), sq("h6")).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn knight_jumps_over_a_full_fence() {
        let mut board = Board::empty();
        board.place(sq("d4"), piece(Color::White, PieceKind::Knight));
        for fence in ["d3", "d5", "c4", "e4"] {
            board.place(sq(fence), piece(Color::Black, PieceKind::Pawn));
        }
        let targets = board.available_targets(sq("d4")).unwrap();
        assert_eq!(targets.len(), 8, "a fenced-in knight keeps all 8 jumps");
        for target in ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"] {
            assert!(targets.contains(&sq(target)), "missing {target}");
        }
    }

    #[test]
    fn pawn_cannot_jump_its_own_blocker() {
        let mut board = Board::empty();
        board.place(sq("a7"), piece(Color::Black, PieceKind::Pawn));
        board.place(sq("a6"), piece(Color::Black, PieceKind::Pawn));
        let err = board.check_can_move(sq("a7"), sq("a5")).unwrap_err();
        assert_eq!(
            err,
            ChessError::PathBlocked {
                from: sq("a7"),
                to: sq("a5"),
                blocked: sq("a6"),
            }
        );
    }

    #[test]
    fn pawn_double_step_into_an_occupied_square_is_rejected() {
        let mut board = Board::empty();
        board.place(sq("e2"), piece(Color::White, PieceKind::Pawn));
        board.place(sq("e4"), piece(Color::Black, PieceKind::Rook));
        // straight pushes may not land on a piece, even an enemy one
        assert!(matches!(
            board.check_can_move(sq("e2"), sq("e4")),
            Err(ChessError::InvalidPieceMove { .. })
        ));
    }

    #[test]
    fn apply_move_changes_exactly_two_squares() {
        let mut board = Board::standard();
        let before: Vec<_> = board.squares().collect();
        let captured = board.apply_move(sq("a2"), sq("a4"));
        assert_eq!(captured, None);
        assert_eq!(board.piece_at(sq("a2")), None);
        assert_eq!(
            board.piece_at(sq("a4")),
            Some(piece(Color::White, PieceKind::Pawn))
        );
        for (square, occupant) in before {
            if square != sq("a2") && square != sq("a4") {
                assert_eq!(board.piece_at(square), occupant, "{square} changed");
            }
        }
    }

    #[test]
    fn apply_move_returns_the_captured_piece() {
        let mut board = Board::empty();
        board.place(sq("a8"), piece(Color::White, PieceKind::Rook));
        board.place(sq("a5"), piece(Color::Black, PieceKind::Pawn));
        assert!(board.check_can_move(sq("a8"), sq("a5")).is_ok());
        let captured = board.apply_move(sq("a8"), sq("a5"));
        assert_eq!(captured, Some(piece(Color::Black, PieceKind::Pawn)));
        assert_eq!(board.piece_at(sq("a8")), None);
    }

    #[test]
    fn obstruction_uses_the_current_board_not_the_initial_one() {
        let mut board = Board::standard();
        // f1-b5 is blocked by the e2 pawn until it advances
        assert!(board.check_can_move(sq("f1"), sq("b5")).is_err());
        board.apply_move(sq("e2"), sq("e4"));
        assert!(board.check_can_move(sq("f1"), sq("b5")).is_ok());
    }

    #[test]
    fn is_right_turn_checks_occupancy_and_color() {
        let board = Board::standard();
        assert!(board.is_right_turn(sq("e2"), Color::White));
        assert!(!board.is_right_turn(sq("e2"), Color::Black));
        assert!(!board.is_right_turn(sq("e4"), Color::White));
    }

    #[test]
    fn is_king_spots_both_kings() {
        let board = Board::standard();
        assert!(board.is_king(sq("e1")));
        assert!(board.is_king(sq("e8")));
        assert!(!board.is_king(sq("d1")));
        assert!(!board.is_king(sq("e4")));
    }

    #[test]
    fn available_targets_of_an_empty_square_is_an_error() {
        let board = Board::standard();
        assert_eq!(
            board.available_targets(sq("e4")),
            Err(ChessError::NoPieceAtSource { square: sq("e4") })
        );
    }

    #[test]
    fn available_targets_of_an_opening_knight() {
        let board = Board::standard();
        let targets = board.available_targets(sq("b1")).unwrap();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&sq("a3")));
        assert!(targets.contains(&sq("c3")));
    }
}
