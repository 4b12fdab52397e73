//! Piece kinds, colors and their movement rules
//!
//! Pieces here are pure rule predicates: a [`Piece`] is just (color, kind)
//! and [`Piece::accepts_vector`] decides whether a move vector fits that
//! kind, given what stands on the target square. Pieces never store their
//! own position; the board owns the square-to-piece mapping.

use std::fmt;

use crate::error::{ChessError, ChessResult};
use crate::square::Square;

/// The two sides in a chess game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a forward move: white advances toward rank 8.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// 0-based rank a pawn of this color starts on.
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// The six piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Base material score. The king is a surviving piece like any other
    /// but carries no material value.
    pub const fn score(self) -> f64 {
        match self {
            PieceKind::Pawn => 1.0,
            PieceKind::Knight => 2.5,
            PieceKind::Bishop => 3.0,
            PieceKind::Rook => 5.0,
            PieceKind::Queen => 9.0,
            PieceKind::King => 0.0,
        }
    }

    /// Lowercase one-letter symbol.
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

/// A colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// One-letter symbol, uppercase for white and lowercase for black.
    pub fn symbol(self) -> char {
        match self.color {
            Color::White => self.kind.symbol().to_ascii_uppercase(),
            Color::Black => self.kind.symbol(),
        }
    }

    /// Checks the move vector from `source` to `target` against this
    /// piece's direction/distance rule.
    ///
    /// `target_piece` is what currently stands on the target square; the
    /// pawn rule depends on it (straight pushes need an empty target,
    /// diagonal steps are captures only). Friendly occupation of the
    /// target has already been rejected by the board at this point.
    /// Obstruction along the path is the board's concern, not checked
    /// here.
    pub fn accepts_vector(
        self,
        source: Square,
        target: Square,
        target_piece: Option<Piece>,
    ) -> ChessResult<()> {
        let (df, dr) = source.delta(target);
        let fits = match self.kind {
            PieceKind::Rook => {
                matches!(source.direction_to(target), Some(d) if d.is_orthogonal())
            }
            PieceKind::Bishop => {
                matches!(source.direction_to(target), Some(d) if d.is_diagonal())
            }
            PieceKind::Queen => source.direction_to(target).is_some(),
            PieceKind::King => {
                source.direction_to(target).is_some() && df.abs() <= 1 && dr.abs() <= 1
            }
            PieceKind::Knight => {
                (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1)
            }
            PieceKind::Pawn => self.pawn_vector_fits(source, df, dr, target_piece),
        };
        if fits {
            Ok(())
        } else {
            Err(ChessError::InvalidPieceMove {
                piece: self,
                from: source,
                to: target,
            })
        }
    }

    fn pawn_vector_fits(
        self,
        source: Square,
        df: i8,
        dr: i8,
        target_piece: Option<Piece>,
    ) -> bool {
        let forward = self.color.forward();
        if df == 0 {
            // straight pushes land on empty squares only
            if target_piece.is_some() {
                return false;
            }
            dr == forward
                || (dr == 2 * forward && source.rank() == self.color.pawn_start_rank())
        } else if df.abs() == 1 && dr == forward {
            // a diagonal step is a capture, never a quiet move
            target_piece.is_some()
        } else {
            false
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(Color::White, kind)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(Color::Black, kind)
    }

    #[test]
    fn opposite_toggles() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn rook_moves_straight_lines_only() {
        let rook = white(PieceKind::Rook);
        assert!(rook.accepts_vector(sq("a1"), sq("a8"), None).is_ok());
        assert!(rook.accepts_vector(sq("a1"), sq("h1"), None).is_ok());
        assert!(rook.accepts_vector(sq("a1"), sq("b2"), None).is_err());
    }

    #[test]
    fn bishop_moves_diagonals_only() {
        let bishop = white(PieceKind::Bishop);
        assert!(bishop.accepts_vector(sq("c1"), sq("h6"), None).is_ok());
        assert!(bishop.accepts_vector(sq("c1"), sq("c4"), None).is_err());
    }

    #[test]
    fn queen_unions_rook_and_bishop() {
        let queen = white(PieceKind::Queen);
        assert!(queen.accepts_vector(sq("d1"), sq("d8"), None).is_ok());
        assert!(queen.accepts_vector(sq("d1"), sq("h5"), None).is_ok());
        assert!(queen.accepts_vector(sq("d1"), sq("e3"), None).is_err());
    }

    #[test]
    fn king_moves_exactly_one_step() {
        let king = white(PieceKind::King);
        for target in ["d3", "d5", "c4", "e4", "c3", "c5", "e3", "e5"] {
            assert!(
                king.accepts_vector(sq("d4"), sq(target), None).is_ok(),
                "king d4 -> {target}"
            );
        }
        assert!(king.accepts_vector(sq("d4"), sq("d6"), None).is_err());
        assert!(king.accepts_vector(sq("d4"), sq("f6"), None).is_err());
    }

    #[test]
    fn knight_uses_the_eight_offsets() {
        let knight = white(PieceKind::Knight);
        for target in ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"] {
            assert!(
                knight.accepts_vector(sq("d4"), sq(target), None).is_ok(),
                "knight d4 -> {target}"
            );
        }
        assert!(knight.accepts_vector(sq("d4"), sq("d6"), None).is_err());
        assert!(knight.accepts_vector(sq("d4"), sq("f6"), None).is_err());
    }

    #[test]
    fn pawn_advances_toward_its_own_forward() {
        let pawn = white(PieceKind::Pawn);
        assert!(pawn.accepts_vector(sq("e2"), sq("e3"), None).is_ok());
        assert!(pawn.accepts_vector(sq("e3"), sq("e2"), None).is_err());

        let pawn = black(PieceKind::Pawn);
        assert!(pawn.accepts_vector(sq("e7"), sq("e6"), None).is_ok());
        assert!(pawn.accepts_vector(sq("e6"), sq("e7"), None).is_err());
    }

    #[test]
    fn pawn_double_step_needs_the_start_rank() {
        let pawn = white(PieceKind::Pawn);
        assert!(pawn.accepts_vector(sq("e2"), sq("e4"), None).is_ok());
        assert!(pawn.accepts_vector(sq("e3"), sq("e5"), None).is_err());

        let pawn = black(PieceKind::Pawn);
        assert!(pawn.accepts_vector(sq("d7"), sq("d5"), None).is_ok());
        assert!(pawn.accepts_vector(sq("d6"), sq("d4"), None).is_err());
    }

    #[test]
    fn pawn_straight_push_needs_an_empty_target() {
        let pawn = white(PieceKind::Pawn);
        let blocker = black(PieceKind::Pawn);
        assert!(pawn.accepts_vector(sq("e2"), sq("e3"), Some(blocker)).is_err());
        assert!(pawn.accepts_vector(sq("e2"), sq("e4"), Some(blocker)).is_err());
    }

    #[test]
    fn pawn_diagonal_is_a_capture_only() {
        let pawn = white(PieceKind::Pawn);
        let victim = black(PieceKind::Knight);
        assert!(pawn.accepts_vector(sq("e4"), sq("d5"), Some(victim)).is_ok());
        assert!(pawn.accepts_vector(sq("e4"), sq("f5"), Some(victim)).is_ok());
        // quiet diagonal step is rejected
        assert!(pawn.accepts_vector(sq("e4"), sq("d5"), None).is_err());
        // capturing backwards is rejected
        assert!(pawn.accepts_vector(sq("e4"), sq("d3"), Some(victim)).is_err());
    }

    #[test]
    fn rejection_is_an_illegal_move_error() {
        let err = white(PieceKind::Rook)
            .accepts_vector(sq("a1"), sq("b3"), None)
            .unwrap_err();
        assert!(err.is_illegal_move());
        assert_eq!(
            err.to_string(),
            "white rook cannot move from a1 to b3"
        );
    }

    #[test]
    fn symbols_are_cased_by_color() {
        assert_eq!(white(PieceKind::King).symbol(), 'K');
        assert_eq!(black(PieceKind::King).symbol(), 'k');
        assert_eq!(white(PieceKind::Knight).symbol(), 'N');
    }

    #[test]
    fn every_kind_has_a_distinct_symbol() {
        let mut symbols: Vec<char> = PieceKind::ALL.iter().map(|kind| kind.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), PieceKind::ALL.len());
    }
}
