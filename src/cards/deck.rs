//! The draw pile.
//!
//! Stored as a `Vec` whose end is the top of the deck, so drawing is a
//! `pop`. A stacked deck is reversed on load so that callers list cards in
//! the order they will be drawn.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, DECK_SIZE};
use crate::core::{EngineError, GameRng};

/// Ordered draw pile. Shrinks monotonically; never refilled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Top of the deck is the last element.
    cards: Vec<Card>,
}

impl Deck {
    /// The 50-card deck in canonical (unshuffled) order.
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for card in Card::all() {
            cards.extend(std::iter::repeat(card).take(card.count()));
        }
        Self { cards }
    }

    /// A standard deck shuffled with [`GameRng::portable_shuffle`].
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    /// A caller-arranged deck. `cards[0]` is drawn first.
    ///
    /// The cards must be a permutation of the standard deck.
    pub fn stacked(cards: &[Card]) -> Result<Self, EngineError> {
        check_composition(cards)?;
        let mut cards = cards.to_vec();
        cards.reverse();
        Ok(Self { cards })
    }

    /// A deck whose first draws are `prefix`, followed by the rest of the
    /// standard deck in canonical order.
    pub fn stacked_prefix(prefix: &[Card]) -> Result<Self, EngineError> {
        let mut rest: Vec<Card> = Self::standard().cards;
        let mut order = Vec::with_capacity(DECK_SIZE);
        for &card in prefix {
            let pos = rest.iter().position(|&c| c == card).ok_or_else(|| {
                EngineError::InvalidDeck(format!("too many copies of {card} in prefix"))
            })?;
            order.push(rest.remove(pos));
        }
        order.extend(rest);
        Self::stacked(&order)
    }

    /// Shuffle in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.portable_shuffle(&mut self.cards);
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::EmptyDeck)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, next draw first.
    pub fn draw_order(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().rev().copied()
    }
}

/// Checks that `cards` holds exactly the standard per-card copy counts.
pub fn check_composition(cards: &[Card]) -> Result<(), EngineError> {
    if cards.len() != DECK_SIZE {
        return Err(EngineError::InvalidDeck(format!(
            "expected {DECK_SIZE} cards, got {}",
            cards.len()
        )));
    }

    let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
    for &card in cards {
        *counts.entry(card).or_insert(0) += 1;
    }

    for card in Card::all() {
        let found = counts.get(&card).copied().unwrap_or(0);
        if found != card.count() {
            return Err(EngineError::InvalidDeck(format!(
                "expected {} copies of {card}, got {found}",
                card.count()
            )));
        }
    }
    Ok(())
}
