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

//! The scoreboard: a single append-only SQLite table of finished games.

use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, Connection, Row};

use crate::error::StoreError;

/// Creates the results table if the file is new.
const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS results (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        winner    TEXT    NOT NULL,
        loser     TEXT    NOT NULL,
        draw      INTEGER NOT NULL,
        played_at TEXT    NOT NULL
    );
";

/// How a stored game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// One player beat the other.
    Win {
        /// Who won.
        winner: String,
        /// Who lost.
        loser: String,
    },
    /// Neither player won. Stored with the draw marker set, so it never
    /// counts as a win.
    Draw {
        /// Who played White.
        white: String,
        /// Who played Black.
        black: String,
    },
}

/// One row of the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRecord {
    /// Assigned by the database.
    pub id: i64,
    /// How the game ended.
    pub outcome: Outcome,
    /// When the result was stored.
    pub played_at: DateTime<Utc>,
}

/// A player and how many games they've won.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerTally {
    /// The name the player entered.
    pub name: String,
    /// Games won; draws aren't counted.
    pub wins: u32,
}

/// A handle to the scoreboard database.
pub struct Scoreboard {
    /// The open database.
    conn: Connection,
}

impl Outcome {
    /// Splits `self` into the values of the winner, loser and draw columns.
    fn columns(&self) -> (&str, &str, bool) {
        match self {
            Self::Win { winner, loser } => (winner, loser, false),
            Self::Draw { white, black } => (white, black, true),
        }
    }
}

impl ResultRecord {
    /// Reads a record from a row of `id, winner, loser, draw, played_at`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let first: String = row.get(1)?;
        let second: String = row.get(2)?;
        let outcome = if row.get::<_, bool>(3)? {
            Outcome::Draw {
                white: first,
                black: second,
            }
        } else {
            Outcome::Win {
                winner: first,
                loser: second,
            }
        };
        Ok(Self {
            id: row.get(0)?,
            outcome,
            played_at: row.get(4)?,
        })
    }
}

impl Scoreboard {
    /// Opens the scoreboard at `path`, creating the file (and its directory)
    /// if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be created or the file can't
    /// be opened as a database.
    #[inline]
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let scoreboard = Self::init(Connection::open(path)?)?;
        info!("scoreboard opened at {}", path.display());
        Ok(scoreboard)
    }

    /// Opens a scoreboard that only lives as long as the returned value.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite can't create the database.
    #[inline]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Creates the schema on `conn` if needed.
    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Appends a finished game.
    ///
    /// # Errors
    ///
    /// Returns an error if the row can't be inserted.
    #[inline]
    pub fn record(&self, outcome: &Outcome, played_at: DateTime<Utc>) -> Result<ResultRecord, StoreError> {
        let (first, second, draw) = outcome.columns();
        self.conn.execute(
            "INSERT INTO results (winner, loser, draw, played_at) VALUES (?1, ?2, ?3, ?4)",
            params![first, second, draw, played_at],
        )?;
        Ok(ResultRecord {
            id: self.conn.last_insert_rowid(),
            outcome: outcome.clone(),
            played_at,
        })
    }

    /// The `limit` players with the most wins, most first. Players with the
    /// same number of wins are ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[inline]
    pub fn top_players(&self, limit: usize) -> Result<Vec<PlayerTally>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT winner, COUNT(*) AS wins FROM results WHERE draw = 0
             GROUP BY winner ORDER BY wins DESC, winner ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(PlayerTally {
                name: row.get(0)?,
                wins: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The `limit` most recent games, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[inline]
    pub fn recent_games(&self, limit: usize) -> Result<Vec<ResultRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, winner, loser, draw, played_at FROM results
             ORDER BY played_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], ResultRecord::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The number of stored games.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[inline]
    pub fn len(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM results", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use chrono::{Duration, TimeZone, Utc};

    use super::{Outcome, PlayerTally, Scoreboard};
    use crate::{
        game::{Game, Phase},
        router::ClickOutcome,
        rules::ChessRules,
    };

    fn win(winner: &str, loser: &str) -> Outcome {
        Outcome::Win {
            winner: winner.to_owned(),
            loser: loser.to_owned(),
        }
    }

    #[test]
    fn top_players_ignore_draws() {
        let store = Scoreboard::open_in_memory().unwrap();
        let now = Utc::now();
        for outcome in [
            win("Ann", "Bob"),
            win("Bob", "Ann"),
            win("Ann", "Cid"),
            win("Cid", "Bob"),
            Outcome::Draw {
                white: String::from("Bob"),
                black: String::from("Cid"),
            },
        ] {
            store.record(&outcome, now).unwrap();
        }

        let top = store.top_players(10).unwrap();
        assert_eq!(
            top,
            [
                PlayerTally {
                    name: String::from("Ann"),
                    wins: 2
                },
                PlayerTally {
                    name: String::from("Bob"),
                    wins: 1
                },
                PlayerTally {
                    name: String::from("Cid"),
                    wins: 1
                },
            ]
        );
        assert_eq!(store.top_players(1).unwrap().len(), 1, "limit is honoured");
        assert_eq!(store.len().unwrap(), 5);
    }

    #[test]
    fn recent_games_newest_first() {
        let store = Scoreboard::open_in_memory().unwrap();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        for i in 0..5 {
            store
                .record(&win(&format!("P{i}"), "X"), start + Duration::minutes(i))
                .unwrap();
        }
        let draw = Outcome::Draw {
            white: String::from("W"),
            black: String::from("B"),
        };
        let stored = store.record(&draw, start + Duration::hours(1)).unwrap();

        let recent = store.recent_games(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0], stored, "the draw is the newest");
        assert_eq!(recent[0].outcome, draw, "the draw marker survives a round trip");
        assert_eq!(recent[1].outcome, win("P4", "X"));
        assert_eq!(recent[2].outcome, win("P3", "X"));
        assert!(recent[1].id > recent[2].id, "ids are assigned in order");
    }

    #[test]
    fn file_lifecycle() {
        let dir = env::temp_dir().join(format!("twinboard-{}", process::id()));
        let path = dir.join("nested").join("scores.db");
        let _ = fs::remove_dir_all(&dir);

        {
            let store = Scoreboard::open(&path).unwrap();
            store.record(&win("A", "B"), Utc::now()).unwrap();
        }
        assert!(path.exists(), "the file is created on first open");

        let store = Scoreboard::open(&path).unwrap();
        assert_eq!(store.len().unwrap(), 1, "results persist between opens");
        drop(store);

        fs::remove_file(&path).unwrap();
        let store = Scoreboard::open(&path).unwrap();
        assert_eq!(store.len().unwrap(), 0, "deleting the file clears history");
        drop(store);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_write_still_resets_the_game() {
        let store = Scoreboard::open_in_memory().unwrap();
        store.conn.execute_batch("DROP TABLE results").unwrap();

        let mut game =
            Game::with_rules(ChessRules::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap());
        game.click_square("a1".parse().unwrap()).unwrap();
        let outcome = game.click_square("a8".parse().unwrap()).unwrap();
        assert!(
            matches!(outcome, ClickOutcome::GameOver { .. }),
            "Ra8 is mate, got {outcome:?}"
        );

        assert!(game.confirm(&store).is_err(), "the table is gone");
        assert_eq!(*game.phase(), Phase::Playing);
        assert_eq!(game.position(), Game::<ChessRules>::new().position());
        assert_eq!(game.last_move(), None);
    }
}
