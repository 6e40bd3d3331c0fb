//! Moves a player can make on their turn.
//!
//! A turn consists of exactly one `Move`. Hints carry their target and
//! the hinted attribute; discards and plays carry a hand index.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::{Card, Color};

/// One player's move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Discard the card at `index` in the mover's hand.
    Discard { index: usize },
    /// Play the card at `index` in the mover's hand.
    Play { index: usize },
    /// Tell `target` which of their cards have `color`.
    ColorHint { target: PlayerId, color: Color },
    /// Tell `target` which of their cards have `value`.
    ValueHint { target: PlayerId, value: u8 },
}

impl Move {
    #[must_use]
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Discard { .. } => MoveKind::Discard,
            Move::Play { .. } => MoveKind::Play,
            Move::ColorHint { .. } => MoveKind::ColorHint,
            Move::ValueHint { .. } => MoveKind::ValueHint,
        }
    }

    /// True for either hint type.
    #[must_use]
    pub fn is_hint(&self) -> bool {
        matches!(self, Move::ColorHint { .. } | Move::ValueHint { .. })
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Discard { index } => write!(f, "discard #{index}"),
            Move::Play { index } => write!(f, "play #{index}"),
            Move::ColorHint { target, color } => write!(f, "tell {target} about {color}"),
            Move::ValueHint { target, value } => write!(f, "tell {target} about {value}s"),
        }
    }
}

/// Move category, as used in the event stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Discard,
    Play,
    ColorHint,
    ValueHint,
}

/// Hand positions matched by a hint, in hand order.
///
/// Bounded by the largest hand (5), so it never spills to the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardIndices(SmallVec<[usize; 5]>);

impl CardIndices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of the cards in `hand` satisfying `pred`.
    pub fn matching(hand: &[Card], pred: impl Fn(&Card) -> bool) -> Self {
        Self(
            hand.iter()
                .enumerate()
                .filter(|(_, card)| pred(card))
                .map(|(i, _)| i)
                .collect(),
        )
    }

    pub fn add(&mut self, index: usize) {
        self.0.push(index);
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}
