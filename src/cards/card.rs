//! Card values: five colours, values 1 through 5.
//!
//! Cards are plain `Copy` values. Two cards with the same colour and value
//! are indistinguishable, so there is no per-instance identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::EngineError;

/// Number of colours (and piles).
pub const NUM_COLORS: usize = 5;

/// Highest card value; a pile holding it is complete.
pub const MAX_VALUE: u8 = 5;

/// Cards in a standard deck: 5 colours x (3 + 2 + 2 + 2 + 1).
pub const DECK_SIZE: usize = 50;

/// Best achievable score.
pub const PERFECT_SCORE: u8 = NUM_COLORS as u8 * MAX_VALUE;

/// Card colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl Color {
    /// All colours in pile order.
    pub const ALL: [Color; NUM_COLORS] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
    ];

    /// Pile index of this colour.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case initial used in the short card notation.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Orange => 'o',
            Color::Yellow => 'y',
            Color::Green => 'g',
            Color::Blue => 'b',
        }
    }

    /// Inverse of [`Color::initial`], case-insensitive.
    #[must_use]
    pub fn from_initial(c: char) -> Option<Self> {
        Color::ALL
            .into_iter()
            .find(|color| color.initial() == c.to_ascii_lowercase())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// A single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub value: u8,
}

impl Card {
    /// Create a card.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in `1..=5`.
    #[must_use]
    pub fn new(color: Color, value: u8) -> Self {
        assert!(is_valid_value(value), "card value must be 1-5, got {value}");
        Self { color, value }
    }

    /// Create a card, or `None` if `value` is not in `1..=5`.
    #[must_use]
    pub fn try_new(color: Color, value: u8) -> Option<Self> {
        is_valid_value(value).then_some(Self { color, value })
    }

    /// Number of copies of this card in a standard deck.
    #[must_use]
    pub fn count(&self) -> usize {
        match self.value {
            1 => 3,
            2..=4 => 2,
            _ => 1,
        }
    }

    /// Every distinct card, colour-major.
    pub fn all() -> impl Iterator<Item = Card> {
        Color::ALL
            .into_iter()
            .flat_map(|color| (1..=MAX_VALUE).map(move |value| Card { color, value }))
    }
}

/// True if `value` is a legal card value.
#[must_use]
pub fn is_valid_value(value: u8) -> bool {
    (1..=MAX_VALUE).contains(&value)
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.color.initial())
    }
}

impl FromStr for Card {
    type Err = EngineError;

    /// Parses the short notation produced by `Display`, e.g. `"3r"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || EngineError::InvalidDeck(format!("unrecognised card {s:?}"));

        let mut chars = s.trim().chars();
        let (Some(v), Some(c), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(bad());
        };
        let value = v.to_digit(10).ok_or_else(bad)? as u8;
        let color = Color::from_initial(c).ok_or_else(bad)?;

        Card::try_new(color, value).ok_or_else(bad)
    }
}
