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

//! Turns board squares into rectangles on screen and back again, once for
//! each of the two panes.
//!
//! All sizes are in egui points. Nothing here looks at the rules: the
//! orientation of a pane only decides where a square is drawn.

use eframe::egui::{Pos2, Rect, Vec2};

use crate::{
    defs::{Piece, Side, Square, SquareSet},
    game::Game,
    router::{LastMove, Selection},
    rules::{Position, RulesEngine},
};

/// Which side of the board is drawn nearest the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Rank 1 at the bottom, the a-file on the left.
    WhiteUp,
    /// Rank 8 at the bottom, the h-file on the left.
    BlackUp,
}

/// One of the two boards on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pane {
    /// Fixed for the lifetime of the pane.
    orientation: Orientation,
    /// The top-left corner of the board.
    origin: Pos2,
    /// The width and height of a single square.
    square_size: f32,
}

/// Where both panes and their banners sit in the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DualLayout {
    /// The left pane.
    white: Pane,
    /// The right pane.
    black: Pane,
    /// The width and height of a single square.
    square_size: f32,
}

/// Everything that is outlined or marked on the boards. The same value is
/// drawn into both panes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Highlights {
    /// The square whose piece is selected.
    pub selected: Option<Square>,
    /// Where the selected piece can go.
    pub destinations: SquareSet,
    /// The last move that was played.
    pub last_move: Option<LastMove>,
}

impl DualLayout {
    /// The default width and height of a square.
    pub const SQUARE_SIZE: f32 = 72.0;
    /// Space between the window edge and the outer side of each board.
    pub const PADDING: f32 = 18.0;
    /// Space between the two boards.
    pub const GAP_BETWEEN: f32 = 28.0;
    /// Height of the strip above the boards.
    pub const TOP_BANNER: f32 = 42.0;
    /// Height of the strip below the boards.
    pub const BOTTOM_BANNER: f32 = 42.0;
}

impl Orientation {
    /// Both orientations, in the order the panes are drawn from left to
    /// right.
    pub const ALL: [Self; 2] = [Self::WhiteUp, Self::BlackUp];

    /// The side whose pieces start nearest the viewer.
    #[inline]
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::WhiteUp => Side::White,
            Self::BlackUp => Side::Black,
        }
    }

    /// The column and row, counted from the top left, that `square` is drawn
    /// at.
    const fn cell_of(self, square: Square) -> (u8, u8) {
        match self {
            Self::WhiteUp => (square.file(), Square::RANKS - 1 - square.rank()),
            Self::BlackUp => (Square::FILES - 1 - square.file(), square.rank()),
        }
    }

    /// The square drawn at the given column and row, counted from the top
    /// left. Returns [`None`] if either is off the board.
    const fn square_at_cell(self, column: u8, row: u8) -> Option<Square> {
        if column >= Square::FILES || row >= Square::RANKS {
            return None;
        }
        match self {
            Self::WhiteUp => Square::from_pos(column, Square::RANKS - 1 - row),
            Self::BlackUp => Square::from_pos(Square::FILES - 1 - column, row),
        }
    }
}

impl Pane {
    /// Creates a pane whose top-left corner is at `origin`.
    #[inline]
    #[must_use]
    pub const fn new(orientation: Orientation, origin: Pos2, square_size: f32) -> Self {
        Self {
            orientation,
            origin,
            square_size,
        }
    }

    /// The orientation of the pane.
    #[inline]
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The area covered by all 64 squares.
    #[inline]
    #[must_use]
    pub fn board_rect(&self) -> Rect {
        Rect::from_min_size(
            self.origin,
            Vec2::splat(self.square_size * f32::from(Square::FILES)),
        )
    }

    /// The rectangle that `square` is drawn in.
    #[inline]
    #[must_use]
    pub fn square_rect(&self, square: Square) -> Rect {
        let (column, row) = self.orientation.cell_of(square);
        let min = self.origin
            + Vec2::new(
                f32::from(column) * self.square_size,
                f32::from(row) * self.square_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.square_size))
    }

    /// Finds the square under `pos`. Returns [`None`] if `pos` is outside the
    /// board.
    #[inline]
    #[must_use]
    pub fn square_at(&self, pos: Pos2) -> Option<Square> {
        let offset = (pos - self.origin) / self.square_size;
        if offset.x < 0.0 || offset.y < 0.0 {
            return None;
        }
        let (column, row) = (offset.x.floor(), offset.y.floor());
        if column >= f32::from(Square::FILES) || row >= f32::from(Square::RANKS) {
            return None;
        }
        self.orientation.square_at_cell(column as u8, row as u8)
    }

    /// Every piece in `position` paired with the rectangle it is drawn in.
    #[inline]
    #[must_use]
    pub fn place_pieces(&self, position: &Position) -> Vec<(Rect, Piece)> {
        position
            .pieces()
            .map(|(square, piece)| (self.square_rect(square), piece))
            .collect()
    }
}

impl DualLayout {
    /// Lays out two boards side by side with squares of `square_size`
    /// points, White-up on the left and Black-up on the right.
    #[inline]
    #[must_use]
    pub fn new(square_size: f32) -> Self {
        let board = square_size * f32::from(Square::FILES);
        let white = Pane::new(
            Orientation::WhiteUp,
            Pos2::new(Self::PADDING, Self::TOP_BANNER),
            square_size,
        );
        let black = Pane::new(
            Orientation::BlackUp,
            Pos2::new(Self::PADDING + board + Self::GAP_BETWEEN, Self::TOP_BANNER),
            square_size,
        );
        Self {
            white,
            black,
            square_size,
        }
    }

    /// The pane with the given orientation.
    #[inline]
    #[must_use]
    pub const fn pane(&self, orientation: Orientation) -> &Pane {
        match orientation {
            Orientation::WhiteUp => &self.white,
            Orientation::BlackUp => &self.black,
        }
    }

    /// Both panes, left then right.
    #[inline]
    #[must_use]
    pub const fn panes(&self) -> [Pane; 2] {
        [self.white, self.black]
    }

    /// Finds the pane and square under `pos`, if any.
    #[inline]
    #[must_use]
    pub fn square_at(&self, pos: Pos2) -> Option<(Orientation, Square)> {
        self.panes()
            .iter()
            .find_map(|pane| pane.square_at(pos).map(|square| (pane.orientation, square)))
    }

    /// The size of the window needed to fit both boards and their banners.
    #[inline]
    #[must_use]
    pub fn window_size(&self) -> Vec2 {
        let board = self.square_size * f32::from(Square::FILES);
        Vec2::new(
            Self::PADDING * 2.0 + board * 2.0 + Self::GAP_BETWEEN,
            Self::TOP_BANNER + board + Self::BOTTOM_BANNER,
        )
    }

    /// The strip above the pane with the given orientation.
    #[inline]
    #[must_use]
    pub fn title_rect(&self, orientation: Orientation) -> Rect {
        let board = self.pane(orientation).board_rect();
        Rect::from_min_max(Pos2::new(board.min.x, 0.0), Pos2::new(board.max.x, board.min.y))
    }

    /// The strip below the pane with the given orientation.
    #[inline]
    #[must_use]
    pub fn footer_rect(&self, orientation: Orientation) -> Rect {
        let board = self.pane(orientation).board_rect();
        Rect::from_min_size(
            Pos2::new(board.min.x, board.max.y),
            Vec2::new(board.width(), Self::BOTTOM_BANNER),
        )
    }
}

impl Default for DualLayout {
    fn default() -> Self {
        Self::new(Self::SQUARE_SIZE)
    }
}

impl Highlights {
    /// Collects the highlights of `game`.
    #[inline]
    #[must_use]
    pub fn from_game<R: RulesEngine>(game: &Game<R>) -> Self {
        let (selected, destinations) = match game.selection() {
            Selection::Idle => (None, SquareSet::EMPTY),
            Selection::Selecting {
                origin,
                destinations,
            } => (Some(origin), destinations),
        };
        Self {
            selected,
            destinations,
            last_move: game.last_move(),
        }
    }
}

/// The banner above a pane.
#[inline]
#[must_use]
pub const fn title_banner(orientation: Orientation) -> &'static str {
    match orientation.side() {
        Side::White => "YOU ARE WHITE",
        Side::Black => "YOU ARE BLACK",
    }
}

/// The banner below a pane, telling the player sitting at it whether it's
/// their move.
#[inline]
#[must_use]
pub fn turn_banner(orientation: Orientation, side_to_move: Side) -> &'static str {
    if orientation.side() == side_to_move {
        "YOUR TURN"
    } else {
        "THEIR TURN"
    }
}
