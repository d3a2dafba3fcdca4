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

use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, Color, File, MoveGen, Rank};

use super::{GameStatus, Position, RulesEngine};
use crate::{
    defs::{Piece, PieceKind, Side, Square, SquareSet},
    error::RulesError,
};

/// Wraps a [`chess::Board`], which does all the move generation and
/// terminal-state detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChessRules {
    /// The current position.
    board: Board,
}

impl ChessRules {
    /// Sets up the position described by `fen`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidPosition`] if `fen` is malformed or
    /// describes an impossible position.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        Board::from_str(fen)
            .map(|board| Self { board })
            .map_err(|err| RulesError::InvalidPosition(format!("{fen}: {err:?}")))
    }

    /// Finds the legal move from `from` to `to`. A plain move is preferred
    /// over a promotion; if only promotions reach `to`, the queen promotion
    /// is chosen.
    fn find_move(&self, from: Square, to: Square) -> Option<ChessMove> {
        let plain = ChessMove::new(to_engine_square(from), to_engine_square(to), None);
        if self.board.legal(plain) {
            return Some(plain);
        }
        let queening = ChessMove::new(
            to_engine_square(from),
            to_engine_square(to),
            Some(chess::Piece::Queen),
        );
        self.board.legal(queening).then_some(queening)
    }
}

impl RulesEngine for ChessRules {
    fn position(&self) -> Position {
        let mut pieces = [None; Square::TOTAL];
        for square in Square::all() {
            let engine_square = to_engine_square(square);
            pieces[square.to_index()] = self
                .board
                .piece_on(engine_square)
                .zip(self.board.color_on(engine_square))
                .map(|(piece, color)| Piece::new(from_engine_color(color), from_engine_piece(piece)));
        }
        Position::new(pieces, from_engine_color(self.board.side_to_move()))
    }

    fn legal_destinations(&self, from: Square) -> SquareSet {
        let from = to_engine_square(from);
        MoveGen::new_legal(&self.board)
            .filter(|mv| mv.get_source() == from)
            .map(|mv| from_engine_square(mv.get_dest()))
            .collect()
    }

    fn submit_move(&mut self, from: Square, to: Square) -> Result<(), RulesError> {
        let mv = self
            .find_move(from, to)
            .ok_or(RulesError::IllegalMove { from, to })?;
        self.board = self.board.make_move_new(mv);
        Ok(())
    }

    fn status(&self) -> GameStatus {
        match self.board.status() {
            BoardStatus::Ongoing => GameStatus::Ongoing,
            BoardStatus::Stalemate => GameStatus::Stalemate,
            // the side to move is the one that's been mated
            BoardStatus::Checkmate => GameStatus::Checkmate {
                winner: from_engine_color(!self.board.side_to_move()),
            },
        }
    }
}

/// Converts a [`Square`] into the engine's square.
fn to_engine_square(square: Square) -> chess::Square {
    chess::Square::make_square(
        Rank::from_index(usize::from(square.rank())),
        File::from_index(usize::from(square.file())),
    )
}

/// Converts the engine's square into a [`Square`]. Both count a1 as 0 and
/// h8 as 63.
fn from_engine_square(square: chess::Square) -> Square {
    Square(square.to_index() as u8)
}

/// Converts the engine's colour into a [`Side`].
const fn from_engine_color(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

/// Converts the engine's piece into a [`PieceKind`].
const fn from_engine_piece(piece: chess::Piece) -> PieceKind {
    match piece {
        chess::Piece::Pawn => PieceKind::Pawn,
        chess::Piece::Knight => PieceKind::Knight,
        chess::Piece::Bishop => PieceKind::Bishop,
        chess::Piece::Rook => PieceKind::Rook,
        chess::Piece::Queen => PieceKind::Queen,
        chess::Piece::King => PieceKind::King,
    }
}
