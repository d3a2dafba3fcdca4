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

use std::{env, path::PathBuf, str::FromStr};

use log::warn;

/// Settings read from the environment at start-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Where the scoreboard is stored.
    pub database_path: PathBuf,
    /// The directory holding the piece images, named `wp.png`, `bk.png` and
    /// so on.
    pub assets_dir: PathBuf,
    /// How many rows the recent-games table shows.
    pub recent_games: usize,
    /// How many rows the top-players table shows.
    pub top_players: usize,
}

impl Config {
    /// Overrides [`database_path`](Self::database_path).
    pub const DATABASE_VAR: &'static str = "TWINBOARD_DB";
    /// Overrides [`assets_dir`](Self::assets_dir).
    pub const ASSETS_VAR: &'static str = "TWINBOARD_ASSETS";
    /// Overrides [`recent_games`](Self::recent_games).
    pub const RECENT_VAR: &'static str = "TWINBOARD_RECENT";
    /// Overrides [`top_players`](Self::top_players).
    pub const TOP_VAR: &'static str = "TWINBOARD_TOP";
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("scoreboard.db"),
            assets_dir: PathBuf::from("assets"),
            recent_games: 10,
            top_players: 10,
        }
    }
}

impl Config {
    /// Reads the config from environment variables, using the default for
    /// anything unset. Call `dotenvy::dotenv()` first to pick up a `.env`
    /// file.
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the config through `lookup`, which maps a variable name to its
    /// value.
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            database_path: lookup(Self::DATABASE_VAR)
                .map_or(defaults.database_path, PathBuf::from),
            assets_dir: lookup(Self::ASSETS_VAR).map_or(defaults.assets_dir, PathBuf::from),
            recent_games: parse_or(&lookup, Self::RECENT_VAR, defaults.recent_games),
            top_players: parse_or(&lookup, Self::TOP_VAR, defaults.top_players),
        }
    }
}

/// Parses the variable `key`, falling back to `default` if it's unset or
/// can't be parsed.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return default;
    };
    value.trim().parse().unwrap_or_else(|_| {
        warn!("ignoring {key}={value:?}: not a valid value");
        default
    })
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use super::Config;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("TWINBOARD_DB", "/tmp/scores.db"),
            ("TWINBOARD_ASSETS", "pieces"),
            ("TWINBOARD_RECENT", " 25 "),
            ("TWINBOARD_TOP", "3"),
        ]);
        assert_eq!(config.database_path, PathBuf::from("/tmp/scores.db"));
        assert_eq!(config.assets_dir, PathBuf::from("pieces"));
        assert_eq!(config.recent_games, 25);
        assert_eq!(config.top_players, 3);
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = config_from(&[("TWINBOARD_RECENT", "lots"), ("TWINBOARD_TOP", "-1")]);
        assert_eq!(config.recent_games, 10);
        assert_eq!(config.top_players, 10);
    }
}
