//! Board coordinates
//!
//! [`Square`] is an immutable (file, rank) pair addressing one of the 64
//! cells, parsed from algebraic notation (`"e2"`) or built from 0-based
//! coordinates. [`Direction`] classifies the vector between two squares
//! into one of the eight compass axes; knight-shaped vectors classify to
//! `None`, which is what exempts the knight from obstruction checks.

use std::fmt;
use std::str::FromStr;

use crate::error::ChessError;

/// One of the eight movement axes of a straight-line move.
///
/// North is toward rank 8, the direction white pawns advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Unit step as (Δfile, Δrank).
    pub const fn step(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    pub const fn is_orthogonal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    pub const fn is_diagonal(self) -> bool {
        !self.is_orthogonal()
    }
}

/// A position on the board: file `a`-`h` and rank `1`-`8`, both stored
/// 0-based. Pure value type with structural equality, usable as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from 0-based coordinates.
    ///
    /// `file` and `rank` can each take a value from 0 to 7.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file >= 8 || rank >= 8 {
            return None;
        }
        Some(Square { file, rank })
    }

    /// 0-based file, `0` = file `a`.
    pub const fn file(self) -> u8 {
        self.file
    }

    /// 0-based rank, `0` = rank `1`.
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Linear index 0-63, rank-major with `a1` = 0.
    pub const fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// Inverse of [`Square::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 64 {
            return None;
        }
        Some(Square {
            file: (index % 8) as u8,
            rank: (index / 8) as u8,
        })
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(|index| Square {
            file: (index % 8) as u8,
            rank: (index / 8) as u8,
        })
    }

    /// The move vector to `target`, decomposed as (Δfile, Δrank).
    pub fn delta(self, target: Square) -> (i8, i8) {
        (
            target.file as i8 - self.file as i8,
            target.rank as i8 - self.rank as i8,
        )
    }

    /// Classifies the vector to `target` as one of the eight axes.
    ///
    /// Returns `None` for the zero vector and for anything that is neither
    /// a straight rank/file line nor an exact diagonal, knight jumps in
    /// particular.
    pub fn direction_to(self, target: Square) -> Option<Direction> {
        let (df, dr) = self.delta(target);
        if df == 0 && dr == 0 {
            return None;
        }
        if df != 0 && dr != 0 && df.abs() != dr.abs() {
            return None;
        }
        match (df.signum(), dr.signum()) {
            (0, 1) => Some(Direction::North),
            (1, 1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, -1) => Some(Direction::SouthEast),
            (0, -1) => Some(Direction::South),
            (-1, -1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, 1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// The square reached by moving (Δfile, Δrank), or `None` when that
    /// leaves the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }
        Some(Square {
            file: file as u8,
            rank: rank as u8,
        })
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidPosition { text: s.to_string() };
        let mut chars = s.chars();
        let file_char = chars.next().ok_or_else(invalid)?;
        let rank_char = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
            return Err(invalid());
        }
        Ok(Square {
            file: file_char as u8 - b'a',
            rank: rank_char as u8 - b'1',
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'1' + self.rank) as char
        )
    }
}
