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

use crate::{defs::Side, rules::GameStatus, store::Outcome};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// One side was checkmated.
    Decisive {
        /// The side that delivered mate.
        winner: Side,
    },
    /// The side to move was stalemated.
    Draw,
}

/// One of the two text fields of a [`NameForm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// The winner's name, or White's name in a draw.
    First,
    /// The loser's name, or Black's name in a draw.
    Second,
}

/// The form shown when the game ends, asking who played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameForm {
    /// How the game ended.
    verdict: Verdict,
    /// The text of [`Field::First`].
    first: String,
    /// The text of [`Field::Second`].
    second: String,
    /// The field being typed into.
    focus: Field,
}

impl Verdict {
    /// The verdict of a finished game, or [`None`] if `status` is
    /// [`GameStatus::Ongoing`].
    #[inline]
    #[must_use]
    pub const fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate { winner } => Some(Self::Decisive { winner }),
            GameStatus::Stalemate => Some(Self::Draw),
        }
    }

    /// A one-line description, e.g. "Checkmate - Black wins".
    #[inline]
    #[must_use]
    pub fn headline(self) -> String {
        match self {
            Self::Decisive { winner } => format!("Checkmate - {winner} wins"),
            Self::Draw => String::from("Stalemate - the game is drawn"),
        }
    }

    /// The sides whose player's name goes in the first and second field.
    const fn sides(self) -> (Side, Side) {
        match self {
            Self::Decisive { winner } => (winner, winner.flip()),
            Self::Draw => (Side::White, Side::Black),
        }
    }
}

impl Field {
    /// The other field.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl NameForm {
    /// Creates an empty form with the first field focused.
    #[inline]
    #[must_use]
    pub const fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            first: String::new(),
            second: String::new(),
            focus: Field::First,
        }
    }

    /// How the game ended.
    #[inline]
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The field being typed into.
    #[inline]
    #[must_use]
    pub const fn focus(&self) -> Field {
        self.focus
    }

    /// Moves the focus to `field`.
    #[inline]
    pub fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    /// Moves the focus to the other field.
    #[inline]
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// The label shown next to `field`.
    #[inline]
    #[must_use]
    pub const fn label(&self, field: Field) -> &'static str {
        match (self.verdict, field) {
            (Verdict::Decisive { .. }, Field::First) => "Winner",
            (Verdict::Decisive { .. }, Field::Second) => "Loser",
            (Verdict::Draw, Field::First) => "White",
            (Verdict::Draw, Field::Second) => "Black",
        }
    }

    /// The text of `field`.
    #[inline]
    #[must_use]
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::First => &self.first,
            Field::Second => &self.second,
        }
    }

    /// The text of `field`, for editing.
    #[inline]
    pub fn text_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::First => &mut self.first,
            Field::Second => &mut self.second,
        }
    }

    /// The name entered for `field`, trimmed. Falls back to the name of the
    /// side that player had if the field is blank.
    #[inline]
    #[must_use]
    pub fn name(&self, field: Field) -> String {
        let (first_side, second_side) = self.verdict.sides();
        let (text, side) = match field {
            Field::First => (&self.first, first_side),
            Field::Second => (&self.second, second_side),
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            side.name().to_owned()
        } else {
            trimmed.to_owned()
        }
    }

    /// The outcome to store for this form.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        let first = self.name(Field::First);
        let second = self.name(Field::Second);
        match self.verdict {
            Verdict::Decisive { .. } => Outcome::Win {
                winner: first,
                loser: second,
            },
            Verdict::Draw => Outcome::Draw {
                white: first,
                black: second,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, NameForm, Verdict};
    use crate::{defs::Side, rules::GameStatus, store::Outcome};

    #[test]
    fn verdicts() {
        assert_eq!(Verdict::from_status(GameStatus::Ongoing), None);
        assert_eq!(
            Verdict::from_status(GameStatus::Stalemate),
            Some(Verdict::Draw)
        );
        assert_eq!(
            Verdict::from_status(GameStatus::Checkmate {
                winner: Side::Black
            }),
            Some(Verdict::Decisive {
                winner: Side::Black
            })
        );
    }

    #[test]
    fn focus_cycles() {
        let mut form = NameForm::new(Verdict::Draw);
        assert_eq!(form.focus(), Field::First);
        form.next_field();
        assert_eq!(form.focus(), Field::Second);
        form.next_field();
        assert_eq!(form.focus(), Field::First);
    }

    #[test]
    fn decisive_outcome() {
        let mut form = NameForm::new(Verdict::Decisive {
            winner: Side::White,
        });
        form.text_mut(Field::First).push_str("  A ");
        form.text_mut(Field::Second).push('B');

        assert_eq!(form.label(Field::First), "Winner");
        assert_eq!(
            form.outcome(),
            Outcome::Win {
                winner: String::from("A"),
                loser: String::from("B"),
            }
        );
    }

    #[test]
    fn blank_names_fall_back_to_sides() {
        let form = NameForm::new(Verdict::Decisive {
            winner: Side::Black,
        });
        assert_eq!(
            form.outcome(),
            Outcome::Win {
                winner: String::from("Black"),
                loser: String::from("White"),
            }
        );

        let form = NameForm::new(Verdict::Draw);
        assert_eq!(form.label(Field::Second), "Black");
        assert_eq!(
            form.outcome(),
            Outcome::Draw {
                white: String::from("White"),
                black: String::from("Black"),
            }
        );
    }
}
