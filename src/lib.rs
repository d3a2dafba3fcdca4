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

//! Twinboard: one game of chess shown on two boards at once, one from
//! White's side and one from Black's, with a scoreboard of finished games.
//!
//! The rules themselves come from the `chess` crate behind
//! [`RulesEngine`](rules::RulesEngine).

/// Configuration read from the environment.
pub mod config;
/// Definitions and enumerations.
pub mod defs;
/// The form shown when a game ends.
pub mod end_of_game;
/// Error types.
pub mod error;
/// A container for [`Game`](game::Game).
pub mod game;
/// Turns clicked squares into moves.
pub mod router;
/// The interface to the rules engine.
pub mod rules;
/// The scoreboard database.
pub mod store;
/// Where each square is drawn in both panes.
pub mod view;
