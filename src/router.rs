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

use log::{debug, error};

use crate::{
    defs::{Square, SquareSet},
    end_of_game::Verdict,
    error::Error,
    rules::RulesEngine,
};

/// The piece the player has picked up, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// No piece is selected.
    #[default]
    Idle,
    /// A piece is selected and its legal destinations are cached.
    Selecting {
        /// The square of the selected piece.
        origin: Square,
        /// Where the selected piece can go, as reported by the rules engine
        /// when it was selected.
        destinations: SquareSet,
    },
}

/// The most recently played move. Kept only so it can be outlined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LastMove {
    /// Where the move started.
    pub from: Square,
    /// Where the move ended.
    pub to: Square,
}

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// The piece on the square was selected (or re-selected).
    Selected(Square),
    /// The selection was dropped without a move.
    Deselected,
    /// A move was played and the game goes on.
    Moved(LastMove),
    /// A move was played and it ended the game.
    GameOver {
        /// The move that ended the game.
        last_move: LastMove,
        /// How the game ended.
        verdict: Verdict,
    },
}

/// Turns clicked squares into selections and moves.
///
/// A move is only ever submitted if its destination is in the set cached
/// when its origin was selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputRouter {
    /// The current selection.
    selection: Selection,
    /// The last accepted move.
    last_move: Option<LastMove>,
}

impl InputRouter {
    /// Creates a new router with nothing selected and no last move.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selection: Selection::Idle,
            last_move: None,
        }
    }

    /// The current selection.
    #[inline]
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// The last accepted move, if any.
    #[inline]
    #[must_use]
    pub const fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Handles a click on `square`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Desync`] if `rules` rejects a move it listed as legal.
    /// The selection is dropped and the game is left as it was.
    #[inline]
    pub fn click<R: RulesEngine>(&mut self, rules: &mut R, square: Square) -> Result<ClickOutcome, Error> {
        let Selection::Selecting {
            origin,
            destinations,
        } = self.selection
        else {
            return Ok(self.select(rules, square));
        };

        if square == origin {
            self.selection = Selection::Idle;
            return Ok(ClickOutcome::Deselected);
        }

        if destinations.contains(square) {
            return self.submit(rules, origin, square);
        }

        // clicking another of the mover's pieces picks that one up instead
        if rules.position().is_movers_piece(square) {
            return Ok(self.select(rules, square));
        }

        self.selection = Selection::Idle;
        Ok(ClickOutcome::Deselected)
    }

    /// Selects the piece on `square` if it belongs to the side to move.
    fn select<R: RulesEngine>(&mut self, rules: &R, square: Square) -> ClickOutcome {
        if !rules.position().is_movers_piece(square) {
            return ClickOutcome::Ignored;
        }
        self.selection = Selection::Selecting {
            origin: square,
            destinations: rules.legal_destinations(square),
        };
        ClickOutcome::Selected(square)
    }

    /// Plays `from` to `to`, which must be in the cached destinations.
    fn submit<R: RulesEngine>(
        &mut self,
        rules: &mut R,
        from: Square,
        to: Square,
    ) -> Result<ClickOutcome, Error> {
        self.selection = Selection::Idle;
        if let Err(source) = rules.submit_move(from, to) {
            let err = Error::Desync { from, to, source };
            error!("{err}");
            return Err(err);
        }

        let last_move = LastMove { from, to };
        self.last_move = Some(last_move);
        debug!("played {from}{to}");

        Ok(Verdict::from_status(rules.status()).map_or(
            ClickOutcome::Moved(last_move),
            |verdict| ClickOutcome::GameOver { last_move, verdict },
        ))
    }
}

#[cfg(test)]
mod tests {
    use oorandom::Rand32;

    use super::{ClickOutcome, InputRouter, LastMove, Selection};
    use crate::{
        defs::{Side, Square, SquareSet},
        end_of_game::Verdict,
        error::{Error, RulesError},
        rules::{ChessRules, GameStatus, Position, RulesEngine},
    };

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    /// Checks every submitted move against the destinations the router was
    /// given for its origin.
    #[derive(Default)]
    struct Spy {
        inner: ChessRules,
        handed_out: Vec<(Square, SquareSet)>,
        submitted: usize,
    }

    impl RulesEngine for Spy {
        fn position(&self) -> Position {
            self.inner.position()
        }

        fn legal_destinations(&self, from: Square) -> SquareSet {
            self.inner.legal_destinations(from)
        }

        fn submit_move(&mut self, from: Square, to: Square) -> Result<(), RulesError> {
            let (origin, destinations) = *self.handed_out.last().unwrap();
            assert_eq!(origin, from, "submitted from the last selected origin");
            assert!(destinations.contains(to), "{from}{to} was never listed");
            self.submitted += 1;
            self.inner.submit_move(from, to)
        }

        fn status(&self) -> GameStatus {
            self.inner.status()
        }
    }

    impl Spy {
        fn click(&mut self, router: &mut InputRouter, square: Square) -> ClickOutcome {
            let outcome = router.click(self, square).unwrap();
            if let Selection::Selecting {
                origin,
                destinations,
            } = router.selection()
            {
                self.handed_out.push((origin, destinations));
            }
            outcome
        }
    }

    /// Lists every pseudo-destination but refuses to play anything.
    #[derive(Default)]
    struct Stubborn(ChessRules);

    impl RulesEngine for Stubborn {
        fn position(&self) -> Position {
            self.0.position()
        }

        fn legal_destinations(&self, from: Square) -> SquareSet {
            self.0.legal_destinations(from)
        }

        fn submit_move(&mut self, from: Square, to: Square) -> Result<(), RulesError> {
            Err(RulesError::IllegalMove { from, to })
        }

        fn status(&self) -> GameStatus {
            self.0.status()
        }
    }

    #[test]
    fn double_pawn_push() {
        let mut rules = ChessRules::default();
        let mut router = InputRouter::new();

        assert_eq!(
            router.click(&mut rules, sq("e2")).unwrap(),
            ClickOutcome::Selected(sq("e2"))
        );
        let Selection::Selecting { destinations, .. } = router.selection() else {
            panic!("e2 should be selected");
        };
        assert!(destinations.contains(sq("e3")), "one step is legal");
        assert!(destinations.contains(sq("e4")), "two steps are legal");
        assert_eq!(destinations.len(), 2);

        let e2e4 = LastMove {
            from: sq("e2"),
            to: sq("e4"),
        };
        assert_eq!(
            router.click(&mut rules, sq("e4")).unwrap(),
            ClickOutcome::Moved(e2e4)
        );
        assert_eq!(router.selection(), Selection::Idle);
        assert_eq!(router.last_move(), Some(e2e4));
        assert_eq!(rules.position().piece_on(sq("e2")), None);
        assert!(rules.position().piece_on(sq("e4")).is_some(), "pawn arrived");
    }

    #[test]
    fn idle_clicks_that_select_nothing() {
        let mut rules = ChessRules::default();
        let mut router = InputRouter::new();

        for square in ["e4", "e7", "h8"] {
            assert_eq!(
                router.click(&mut rules, sq(square)).unwrap(),
                ClickOutcome::Ignored,
                "{square} holds nothing White can move"
            );
            assert_eq!(router.selection(), Selection::Idle);
        }
    }

    #[test]
    fn reclicking_the_origin_deselects() {
        let mut rules = ChessRules::default();
        let mut router = InputRouter::new();

        router.click(&mut rules, sq("b1")).unwrap();
        assert_eq!(
            router.click(&mut rules, sq("b1")).unwrap(),
            ClickOutcome::Deselected
        );
        assert_eq!(router.selection(), Selection::Idle);
    }

    #[test]
    fn clicking_another_own_piece_reselects() {
        let mut rules = ChessRules::default();
        let mut router = InputRouter::new();

        router.click(&mut rules, sq("b1")).unwrap();
        assert_eq!(
            router.click(&mut rules, sq("g1")).unwrap(),
            ClickOutcome::Selected(sq("g1"))
        );
        assert_eq!(
            router.selection(),
            Selection::Selecting {
                origin: sq("g1"),
                destinations: [sq("f3"), sq("h3")].into_iter().collect(),
            }
        );

        // a piece with nowhere to go can still be picked up
        router.click(&mut rules, sq("a1")).unwrap();
        assert_eq!(
            router.selection(),
            Selection::Selecting {
                origin: sq("a1"),
                destinations: SquareSet::EMPTY,
            }
        );
    }

    #[test]
    fn illegal_destination_deselects_without_moving() {
        let mut rules = ChessRules::default();
        let before = rules;
        let mut router = InputRouter::new();

        router.click(&mut rules, sq("e2")).unwrap();
        assert_eq!(
            router.click(&mut rules, sq("e5")).unwrap(),
            ClickOutcome::Deselected
        );
        // an enemy piece that can't be captured behaves the same
        router.click(&mut rules, sq("e2")).unwrap();
        assert_eq!(
            router.click(&mut rules, sq("d7")).unwrap(),
            ClickOutcome::Deselected
        );

        assert_eq!(rules, before, "nothing was played");
        assert_eq!(router.last_move(), None);
    }

    #[test]
    fn mate_ends_the_game() {
        let mut rules = ChessRules::default();
        let mut router = InputRouter::new();

        // fool's mate
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
            router.click(&mut rules, sq(from)).unwrap();
            assert!(matches!(
                router.click(&mut rules, sq(to)).unwrap(),
                ClickOutcome::Moved(_)
            ));
        }
        router.click(&mut rules, sq("d8")).unwrap();
        assert_eq!(
            router.click(&mut rules, sq("h4")).unwrap(),
            ClickOutcome::GameOver {
                last_move: LastMove {
                    from: sq("d8"),
                    to: sq("h4"),
                },
                verdict: Verdict::Decisive {
                    winner: Side::Black
                },
            }
        );
    }

    #[test]
    fn rejected_cached_move_is_a_desync() {
        let mut rules = Stubborn::default();
        let mut router = InputRouter::new();

        router.click(&mut rules, sq("e2")).unwrap();
        let err = router.click(&mut rules, sq("e4")).unwrap_err();
        assert!(
            matches!(err, Error::Desync { from, to, .. } if from == sq("e2") && to == sq("e4")),
            "got {err:?}"
        );
        assert_eq!(router.selection(), Selection::Idle);
        assert_eq!(router.last_move(), None);
    }

    #[test]
    fn random_clicks_only_submit_cached_moves() {
        let mut rng = Rand32::new(0x7769_6e62);
        for _ in 0..20 {
            let mut spy = Spy::default();
            let mut router = InputRouter::new();
            for _ in 0..400 {
                let square = Square::from_index(rng.rand_range(0..64) as usize).unwrap();
                if let ClickOutcome::GameOver { .. } = spy.click(&mut router, square) {
                    break;
                }
            }
            assert!(
                spy.submitted <= spy.handed_out.len(),
                "every move came after a selection"
            );
        }
    }
}
