/*
 * Twinboard, a two-perspective chess board
 * Copyright (C) 2024 Jasper Shovelton
 *
 * Twinboard is free software: you can redistribute it and/or modify it under
 * the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * Twinboard is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Twinboard. If not, see <https://www.gnu.org/licenses/>.
 */

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::error::ParseError;

/// A square on the board, stored as `rank * 8 + file` so that a1 is 0 and h8
/// is 63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub(crate) u8);

/// A set of squares, one bit per square in the same order as [`Square`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SquareSet(u64);

/// A thin wrapper over a [`SquareSet`] to allow iteration over it.
pub struct SquareIter {
    /// The squares that haven't been yielded yet.
    set: u64,
}

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The side that moves first.
    White,
    /// The side that moves second.
    Black,
}

/// The type of a piece, regardless of its side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// A pawn.
    Pawn,
    /// A knight.
    Knight,
    /// A bishop.
    Bishop,
    /// A rook.
    Rook,
    /// A queen.
    Queen,
    /// A king.
    King,
}

/// A piece of a given kind belonging to a given side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Who owns the piece.
    pub side: Side,
    /// What the piece is.
    pub kind: PieceKind,
}

impl Square {
    /// The number of files on the board.
    pub const FILES: u8 = 8;
    /// The number of ranks on the board.
    pub const RANKS: u8 = 8;
    /// The number of squares on the board.
    pub const TOTAL: usize = 64;
}

impl Square {
    /// Creates a square from a file and a rank, both counted from 0. Returns
    /// [`None`] if either is off the board.
    #[inline]
    #[must_use]
    pub const fn from_pos(file: u8, rank: u8) -> Option<Self> {
        if file < Self::FILES && rank < Self::RANKS {
            Some(Self(rank * Self::FILES + file))
        } else {
            None
        }
    }

    /// Creates a square from its index in `0..64`.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::TOTAL {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// The file of `self`: 0 for the a-file, 7 for the h-file.
    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 % Self::FILES
    }

    /// The rank of `self`: 0 for the first rank, 7 for the eighth.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 / Self::FILES
    }

    /// The index of `self` in `0..64`.
    #[inline]
    #[must_use]
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }

    /// Whether `self` is a light square. a1 is dark.
    #[inline]
    #[must_use]
    pub const fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    /// Iterates over all 64 squares from a1 to h8.
    #[inline]
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::TOTAL as u8).map(Self)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file()),
            char::from(b'1' + self.rank())
        )
    }
}

impl FromStr for Square {
    type Err = ParseError;

    /// Parses a square in algebraic notation, e.g. `e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(ParseError::ExpectedToken)?;
        let rank = chars.next().ok_or(ParseError::ExpectedToken)?;
        if chars.next().is_some() {
            return Err(ParseError::InvalidToken(s.to_owned()));
        }

        let file = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => return Err(ParseError::ErroneousToken(s.to_owned())),
        };
        let rank = match rank {
            c @ '1'..='8' => c as u8 - b'1',
            _ => return Err(ParseError::ErroneousToken(s.to_owned())),
        };

        Self::from_pos(file, rank).ok_or_else(|| ParseError::ErroneousToken(s.to_owned()))
    }
}

impl SquareSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Adds `square` to `self`.
    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1 << square.to_index();
    }

    /// Checks if `square` is in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1 << square.to_index()) != 0
    }

    /// Checks if `self` has no squares.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// How many squares are in `self`.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareIter;

    fn into_iter(self) -> Self::IntoIter {
        SquareIter { set: self.0 }
    }
}

impl Iterator for SquareIter {
    type Item = Square;

    /// Clears the LSB of the wrapped set and returns the square of that bit.
    /// Returns [`None`] if there are no set bits.
    fn next(&mut self) -> Option<Self::Item> {
        if self.set == 0 {
            return None;
        }
        let square = Square(self.set.trailing_zeros() as u8);
        self.set &= self.set - 1;
        Some(square)
    }
}

impl Side {
    /// Both sides, White first.
    pub const ALL: [Self; 2] = [Self::White, Self::Black];

    /// The other side.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// The capitalised name of the side.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PieceKind {
    /// Every kind of piece, from pawn to king.
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];
}

impl Piece {
    /// Creates a new [`Piece`].
    #[inline]
    #[must_use]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    /// The two-letter code of the piece, e.g. `wp` or `bk`. Piece images are
    /// named after it.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match (self.side, self.kind) {
            (Side::White, PieceKind::Pawn) => "wp",
            (Side::White, PieceKind::Knight) => "wn",
            (Side::White, PieceKind::Bishop) => "wb",
            (Side::White, PieceKind::Rook) => "wr",
            (Side::White, PieceKind::Queen) => "wq",
            (Side::White, PieceKind::King) => "wk",
            (Side::Black, PieceKind::Pawn) => "bp",
            (Side::Black, PieceKind::Knight) => "bn",
            (Side::Black, PieceKind::Bishop) => "bb",
            (Side::Black, PieceKind::Rook) => "br",
            (Side::Black, PieceKind::Queen) => "bq",
            (Side::Black, PieceKind::King) => "bk",
        }
    }

    /// The letter of the piece in FEN: uppercase for White, lowercase for
    /// Black. Drawn when no image of the piece is found.
    #[inline]
    #[must_use]
    pub const fn letter(self) -> char {
        let letter = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.side {
            Side::White => letter.to_ascii_uppercase(),
            Side::Black => letter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Square, SquareSet};

    #[test]
    fn square_notation() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!((e4.file(), e4.rank()), (4, 3), "e4 is file 4, rank 3");
        assert_eq!(e4.to_string(), "e4");
        assert_eq!("a1".parse::<Square>().unwrap().to_index(), 0);
        assert_eq!("h8".parse::<Square>().unwrap().to_index(), 63);
        assert!("i1".parse::<Square>().is_err(), "i is not a file");
        assert!("a9".parse::<Square>().is_err(), "9 is not a rank");
        assert!("e".parse::<Square>().is_err(), "missing rank");
        assert!("e44".parse::<Square>().is_err(), "trailing garbage");
    }

    #[test]
    fn square_colours() {
        assert!(!"a1".parse::<Square>().unwrap().is_light(), "a1 is dark");
        assert!("h1".parse::<Square>().unwrap().is_light(), "h1 is light");
        assert!(!"h8".parse::<Square>().unwrap().is_light(), "h8 is dark");
    }

    #[test]
    fn square_set_iterates_in_order() {
        let squares = ["h8", "a1", "e4", "e4"].map(|s| s.parse::<Square>().unwrap());
        let set: SquareSet = squares.into_iter().collect();

        assert_eq!(set.len(), 3, "duplicates collapse");
        let collected: Vec<String> = set.into_iter().map(|s| s.to_string()).collect();
        assert_eq!(collected, ["a1", "e4", "h8"]);
        assert!(SquareSet::EMPTY.is_empty(), "the empty set is empty");
    }
}
