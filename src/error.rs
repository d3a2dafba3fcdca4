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

use std::io;

use thiserror::Error;

use crate::defs::Square;

/// An error that occurs when a string cannot be parsed.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error)]
pub enum ParseError {
    /// A token was outside an expected range.
    #[error("token \"{0}\" is out of range")]
    ErroneousToken(String),
    /// Expected a token but found nothing.
    #[error("expected a token but found nothing")]
    ExpectedToken,
    /// Expected a different token.
    #[error("unexpected token \"{0}\"")]
    InvalidToken(String),
}

/// An error reported by a rules engine.
#[derive(Debug, Error)]
pub enum RulesError {
    /// The engine did not accept the move.
    #[error("illegal move {from}{to}")]
    IllegalMove {
        /// Where the move started.
        from: Square,
        /// Where the move ended.
        to: Square,
    },
    /// A position could not be loaded.
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// An error from the scoreboard store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The directory holding the store could not be created.
    #[error("could not create the scoreboard directory: {0}")]
    Io(#[from] io::Error),
    /// The database rejected a statement.
    #[error("scoreboard database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// An error from driving a [`Game`](crate::game::Game).
#[derive(Debug, Error)]
pub enum Error {
    /// The rules engine rejected a move that it had itself reported as legal
    /// from the same position.
    #[error("rules engine rejected {from}{to} despite listing it as legal: {source}")]
    Desync {
        /// Where the move started.
        from: Square,
        /// Where the move ended.
        to: Square,
        /// What the engine reported.
        source: RulesError,
    },
}
