//! Event records for external logging and analytics.
//!
//! Every applied move produces a `MoveRecord`; a finished game produces a
//! `GameRecord`. Records are written after the fact and may contain
//! information that was hidden during play (the initial deck order, the
//! card each discard revealed), so they are never handed to agents.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color};
use crate::core::{EngineError, GameOverReason, GameRngState, Move, MoveKind, MoveOutcome, PlayerId};

/// Compact per-move event.
///
/// `rank` is the 0-indexed card value, or -1 when the move carries no
/// value (colour hints). `color` is `None` for value hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveEvent {
    pub kind: MoveKind,
    pub color: Option<Color>,
    pub rank: i8,
}

impl MoveEvent {
    /// Build the event for `mv`. Discards and plays take colour and rank
    /// from the revealed card.
    #[must_use]
    pub fn new(mv: Move, revealed: Option<Card>) -> Self {
        let (color, rank) = match mv {
            Move::Discard { .. } | Move::Play { .. } => match revealed {
                Some(card) => (Some(card.color), card.value as i8 - 1),
                None => (None, -1),
            },
            Move::ColorHint { color, .. } => (Some(color), -1),
            Move::ValueHint { value, .. } => (None, value as i8 - 1),
        };
        Self {
            kind: mv.kind(),
            color,
            rank,
        }
    }
}

/// One applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number (0-based) the move was made on.
    pub turn: u32,
    pub player: PlayerId,
    pub mv: Move,
    pub event: MoveEvent,
    pub outcome: MoveOutcome,
}

/// A completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_number: u32,
    pub player_count: usize,
    /// RNG checkpoint taken before shuffling. `None` for stacked decks.
    pub rng_state: Option<GameRngState>,
    /// Deck before the deal, first draw first.
    pub initial_deck: Vec<Card>,
    pub moves: Vector<MoveRecord>,
    pub final_score: u8,
    pub end_reason: GameOverReason,
}

impl GameRecord {
    /// Binary encoding for event sinks.
    pub fn encode(&self) -> Result<Vec<u8>, EngineError> {
        bincode::serialize(self).map_err(|e| EngineError::Encoding(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, EngineError> {
        bincode::deserialize(bytes).map_err(|e| EngineError::Encoding(e.to_string()))
    }

    /// Events in play order.
    pub fn events(&self) -> impl Iterator<Item = MoveEvent> + '_ {
        self.moves.iter().map(|record| record.event)
    }
}
