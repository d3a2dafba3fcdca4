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

use crate::{
    defs::{Piece, Side, Square, SquareSet},
    error::RulesError,
};

pub use chess_crate::ChessRules;

/// A [`RulesEngine`] backed by the `chess` crate.
mod chess_crate;

/// Whether the game can continue and, if not, how it ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Ongoing,
    /// The side to move is in check and has no legal moves.
    Checkmate {
        /// The side that delivered mate.
        winner: Side,
    },
    /// The side to move is not in check and has no legal moves.
    Stalemate,
}

/// A snapshot of the placement of every piece and the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// The piece on each square, indexed by [`Square::to_index`].
    pieces: [Option<Piece>; Square::TOTAL],
    /// Who plays next.
    side_to_move: Side,
}

/// The operations the rest of the crate needs from a chess rules
/// implementation. Nothing outside an implementor may look at how it stores
/// the game.
///
/// Resetting is done by replacing the engine with a new one, so implementors
/// are expected to also implement [`Default`] as the standard starting
/// position.
pub trait RulesEngine {
    /// The current placement of pieces and the side to move.
    fn position(&self) -> Position;

    /// Every square the piece on `from` can legally move to. Empty if there
    /// is no piece on `from` or it isn't that piece's side to move.
    fn legal_destinations(&self, from: Square) -> SquareSet;

    /// Plays the move from `from` to `to`. A pawn reaching the last rank
    /// becomes a queen.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::IllegalMove`] and leaves the game untouched if
    /// the move isn't legal.
    fn submit_move(&mut self, from: Square, to: Square) -> Result<(), RulesError>;

    /// Whether the side to move is checkmated, stalemated or neither.
    fn status(&self) -> GameStatus;
}

impl GameStatus {
    /// Checks if the game has ended.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

impl Position {
    /// Creates a position from the piece on each square.
    #[inline]
    #[must_use]
    pub const fn new(pieces: [Option<Piece>; Square::TOTAL], side_to_move: Side) -> Self {
        Self {
            pieces,
            side_to_move,
        }
    }

    /// Finds the piece on `square`, if any.
    #[inline]
    #[must_use]
    pub const fn piece_on(&self, square: Square) -> Option<Piece> {
        self.pieces[square.to_index()]
    }

    /// The side that plays next.
    #[inline]
    #[must_use]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Checks if `square` holds a piece belonging to the side to move.
    #[inline]
    #[must_use]
    pub fn is_movers_piece(&self, square: Square) -> bool {
        self.piece_on(square)
            .is_some_and(|piece| piece.side == self.side_to_move)
    }

    /// Iterates over every occupied square and the piece on it.
    #[inline]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_on(square).map(|piece| (square, piece)))
    }
}
