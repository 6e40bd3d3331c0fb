//! Played progress for one colour.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::{Card, Color, MAX_VALUE};
use crate::core::EngineError;

/// How many consecutive values (from 1) of one colour have been played.
///
/// Size only ever grows, one step at a time, and only through
/// [`Pile::increment`] after a matching play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pile {
    color: Color,
    size: u8,
}

impl Pile {
    /// An empty pile.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self { color, size: 0 }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of cards played on this pile (0-5).
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.size == MAX_VALUE
    }

    /// The highest card played. Fails on an empty pile.
    pub fn top_card(&self) -> Result<Card, EngineError> {
        if self.size == 0 {
            return Err(EngineError::InvalidState("empty pile has no top card"));
        }
        Ok(Card::new(self.color, self.size))
    }

    /// True iff `value` is exactly the next value this pile accepts.
    #[must_use]
    pub fn next_value_is(&self, value: u8) -> bool {
        value == self.size + 1
    }

    /// True iff `card` can be played on this pile right now.
    #[must_use]
    pub fn accepts(&self, card: Card) -> bool {
        card.color == self.color && self.next_value_is(card.value)
    }

    /// Record one more card played. Fails if the pile is already complete.
    pub fn increment(&mut self) -> Result<(), EngineError> {
        if self.is_complete() {
            return Err(EngineError::InvalidState("pile is already complete"));
        }
        self.size += 1;
        Ok(())
    }
}

impl fmt::Display for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.size, self.color.initial())
    }
}
