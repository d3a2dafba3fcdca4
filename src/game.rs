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

use std::mem;

use chrono::Utc;
use log::{debug, info, warn};

use crate::{
    defs::Square,
    end_of_game::NameForm,
    error::{Error, StoreError},
    router::{ClickOutcome, InputRouter, LastMove, Selection},
    rules::{ChessRules, GameStatus, Position, RulesEngine},
    store::{ResultRecord, Scoreboard},
};

/// Whether the boards take input or the end-of-game form is open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// The game is in progress.
    #[default]
    Playing,
    /// The game has ended and the players are asked for their names.
    GameOver(NameForm),
}

/// The single game shown on both boards.
///
/// Owns the rules engine, the input router and the end-of-game form. There
/// is exactly one of these per window and it is passed around by reference.
///
/// [`Game::new`] starts a game from the standard position. [`Game::reset`]
/// throws the current game away and does the same again, clearing the
/// selection, the last move and any open form.
pub struct Game<R = ChessRules> {
    /// The authoritative state of the game.
    rules: R,
    /// Turns clicks into moves.
    router: InputRouter,
    /// Whether input goes to the boards or to the form.
    phase: Phase,
}

impl<R: RulesEngine + Default> Game<R> {
    /// Starts a new game from the standard starting position.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(R::default())
    }

    /// Replaces the game with a new one from the standard starting position.
    #[inline]
    pub fn reset(&mut self) {
        self.rules = R::default();
        self.router = InputRouter::new();
        self.phase = Phase::Playing;
        debug!("game reset");
    }

    /// Stores the names in the end-of-game form as a result in `store`, then
    /// resets the game. Does nothing if no game has ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the result couldn't be stored. The game is reset
    /// regardless.
    #[inline]
    pub fn confirm(&mut self, store: &Scoreboard) -> Result<Option<ResultRecord>, StoreError> {
        let Phase::GameOver(form) = mem::take(&mut self.phase) else {
            return Ok(None);
        };
        let stored = store.record(&form.outcome(), Utc::now());
        self.reset();

        match stored {
            Ok(record) => {
                info!("stored result #{}: {:?}", record.id, record.outcome);
                Ok(Some(record))
            }
            Err(err) => {
                warn!("could not store {:?}: {err}", form.outcome());
                Err(err)
            }
        }
    }

    /// Closes the end-of-game form without storing anything and resets the
    /// game. Does nothing if no game has ended.
    #[inline]
    pub fn cancel(&mut self) {
        if matches!(self.phase, Phase::GameOver(_)) {
            self.reset();
        }
    }
}

impl<R: RulesEngine> Game<R> {
    /// Starts from whatever position `rules` is in.
    #[inline]
    #[must_use]
    pub const fn with_rules(rules: R) -> Self {
        Self {
            rules,
            router: InputRouter::new(),
            phase: Phase::Playing,
        }
    }

    /// Handles a click on `square` in either pane. Clicks are ignored while
    /// the end-of-game form is open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Desync`] if the rules engine rejected a move it had
    /// listed as legal. This is a bug, not a user mistake.
    #[inline]
    pub fn click_square(&mut self, square: Square) -> Result<ClickOutcome, Error> {
        if let Phase::GameOver(_) = self.phase {
            return Ok(ClickOutcome::Ignored);
        }

        let outcome = self.router.click(&mut self.rules, square)?;
        if let ClickOutcome::GameOver { verdict, .. } = outcome {
            info!("game over: {}", verdict.headline());
            self.phase = Phase::GameOver(NameForm::new(verdict));
        }
        Ok(outcome)
    }

    /// The current placement of pieces and the side to move.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.rules.position()
    }

    /// Whether the game is still going.
    #[inline]
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.rules.status()
    }

    /// The current selection.
    #[inline]
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.router.selection()
    }

    /// The last move played, if any.
    #[inline]
    #[must_use]
    pub const fn last_move(&self) -> Option<LastMove> {
        self.router.last_move()
    }

    /// Whether input goes to the boards or the form.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The end-of-game form, if the game has ended.
    #[inline]
    pub fn name_form_mut(&mut self) -> Option<&mut NameForm> {
        match &mut self.phase {
            Phase::GameOver(form) => Some(form),
            Phase::Playing => None,
        }
    }

    /// Moves the focus of the end-of-game form to its other field.
    #[inline]
    pub fn next_field(&mut self) {
        if let Some(form) = self.name_form_mut() {
            form.next_field();
        }
    }
}

impl<R: RulesEngine + Default> Default for Game<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, Phase};
    use crate::{
        defs::{Side, Square},
        end_of_game::{Field, Verdict},
        router::{ClickOutcome, Selection},
        rules::{ChessRules, GameStatus},
        store::{Outcome, Scoreboard},
    };

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn from_fen(fen: &str) -> Game {
        Game::with_rules(ChessRules::from_fen(fen).unwrap())
    }

    fn play(game: &mut Game, from: &str, to: &str) -> ClickOutcome {
        assert!(
            matches!(game.click_square(sq(from)).unwrap(), ClickOutcome::Selected(_)),
            "{from} should be selectable"
        );
        game.click_square(sq(to)).unwrap()
    }

    #[test]
    fn checkmate_is_recorded() {
        let store = Scoreboard::open_in_memory().unwrap();
        let mut game = from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");

        let outcome = play(&mut game, "a1", "a8");
        assert!(
            matches!(outcome, ClickOutcome::GameOver { .. }),
            "mate opens the form, got {outcome:?}"
        );
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Side::White
            }
        );
        assert_eq!(game.selection(), Selection::Idle);

        // the boards don't take input while the form is open
        assert_eq!(game.click_square(sq("g8")).unwrap(), ClickOutcome::Ignored);

        let form = game.name_form_mut().unwrap();
        assert_eq!(
            form.verdict(),
            Verdict::Decisive {
                winner: Side::White
            }
        );
        form.text_mut(Field::First).push('A');
        game.next_field();
        let form = game.name_form_mut().unwrap();
        assert_eq!(form.focus(), Field::Second);
        form.text_mut(Field::Second).push('B');

        let record = game.confirm(&store).unwrap().unwrap();
        assert_eq!(
            record.outcome,
            Outcome::Win {
                winner: String::from("A"),
                loser: String::from("B"),
            }
        );
        assert_eq!(store.len().unwrap(), 1, "exactly one record");
        assert_eq!(store.recent_games(5).unwrap(), [record]);

        assert_eq!(*game.phase(), Phase::Playing);
        assert_eq!(game.position(), Game::<ChessRules>::new().position());
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn stalemate_is_recorded_as_a_draw() {
        let store = Scoreboard::open_in_memory().unwrap();
        let mut game = from_fen("k7/8/8/2Q5/8/8/8/7K w - - 0 1");

        let outcome = play(&mut game, "c5", "b6");
        assert!(
            matches!(
                outcome,
                ClickOutcome::GameOver {
                    verdict: Verdict::Draw,
                    ..
                }
            ),
            "got {outcome:?}"
        );
        assert_eq!(game.status(), GameStatus::Stalemate);

        let form = game.name_form_mut().unwrap();
        form.text_mut(Field::First).push_str("Ann");
        form.text_mut(Field::Second).push_str("Bob");
        game.confirm(&store).unwrap();

        let stored = store.recent_games(1).unwrap();
        assert_eq!(
            stored[0].outcome,
            Outcome::Draw {
                white: String::from("Ann"),
                black: String::from("Bob"),
            }
        );
        assert!(
            store.top_players(10).unwrap().is_empty(),
            "a draw is not a win for anyone"
        );
    }

    #[test]
    fn cancel_resets_without_recording() {
        let store = Scoreboard::open_in_memory().unwrap();
        let mut game = from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        play(&mut game, "a1", "a8");

        game.cancel();
        assert_eq!(*game.phase(), Phase::Playing);
        assert_eq!(game.position(), Game::<ChessRules>::new().position());
        assert_eq!(store.len().unwrap(), 0);

        // confirming with no game over does nothing
        assert_eq!(game.confirm(&store).unwrap(), None);
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut game = Game::<ChessRules>::new();
        let initial = game.position();

        play(&mut game, "e2", "e4");
        game.click_square(sq("e7")).unwrap();

        for _ in 0..2 {
            game.reset();
            assert_eq!(game.position(), initial);
            assert_eq!(game.selection(), Selection::Idle);
            assert_eq!(game.last_move(), None);
            assert_eq!(*game.phase(), Phase::Playing);
        }
    }

    #[test]
    fn fools_mate_from_the_start() {
        let mut game = Game::<ChessRules>::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
            assert!(matches!(play(&mut game, from, to), ClickOutcome::Moved(_)));
        }
        assert!(matches!(
            play(&mut game, "d8", "h4"),
            ClickOutcome::GameOver {
                verdict: Verdict::Decisive {
                    winner: Side::Black
                },
                ..
            }
        ));
        assert!(matches!(game.phase(), Phase::GameOver(_)));
    }
}
