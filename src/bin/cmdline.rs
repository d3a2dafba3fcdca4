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

//! Reads the scoreboard from the command line.
//!
//! Commands are read one per line from stdin:
//! - `top [n]` lists the players with the most wins
//! - `recent [n]` lists the most recently finished games
//! - `quit` exits

use std::io::stdin;

use backend::{
    config::Config,
    error::StoreError,
    store::{Outcome, Scoreboard},
};
use chrono::Local;
use env_logger::Env;

fn main() -> Result<(), StoreError> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store = Scoreboard::open(&config.database_path)?;

    for line in stdin().lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let command = tokens.next();
        let limit = tokens.next().map(str::parse::<usize>);

        match (command, limit) {
            (Some("top"), None) => print_top(&store, config.top_players)?,
            (Some("top"), Some(Ok(n))) => print_top(&store, n)?,
            (Some("recent"), None) => print_recent(&store, config.recent_games)?,
            (Some("recent"), Some(Ok(n))) => print_recent(&store, n)?,
            (Some("quit"), _) => break,
            (Some("top" | "recent"), Some(Err(_))) => println!("Expected a number after the command"),
            (Some(other), _) => println!("Unknown command: '{other}'"),
            (None, _) => {}
        }
    }
    Ok(())
}

/// Prints the `limit` players with the most wins.
fn print_top(store: &Scoreboard, limit: usize) -> Result<(), StoreError> {
    for (place, tally) in store.top_players(limit)?.iter().enumerate() {
        println!("{:>3}. {:<24} {}", place + 1, tally.name, tally.wins);
    }
    Ok(())
}

/// Prints the `limit` most recently finished games, newest first.
fn print_recent(store: &Scoreboard, limit: usize) -> Result<(), StoreError> {
    for record in store.recent_games(limit)? {
        let played_at = record.played_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        match record.outcome {
            Outcome::Win { winner, loser } => println!("{played_at}  {winner} beat {loser}"),
            Outcome::Draw { white, black } => println!("{played_at}  {white} drew with {black}"),
        }
    }
    Ok(())
}
