//! Engine errors.
//!
//! Two classes of failure exist. `ProtocolViolation` means an agent broke the
//! calling contract (moved twice, peeked at its own hand, hinted itself...);
//! the run is aborted. Everything else in `EngineError` is a setup or internal
//! consistency failure. A failed play is neither: it is an ordinary game
//! outcome and costs a mulligan.

use thiserror::Error;

use super::player::PlayerId;

/// Contract breaches by an agent. Always fatal to the current game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    #[error("agent attempted to move twice in one turn")]
    MovedTwice,

    #[error("agent returned from make_move without moving")]
    NoMove,

    #[error("cannot give a hint to oneself")]
    HintToSelf,

    #[error("{player} is not seated at this table")]
    PlayerOutOfRange { player: PlayerId },

    #[error("card index {index} is out of range for a hand of {hand_size}")]
    CardIndexOutOfRange { index: usize, hand_size: usize },

    #[error("{value} is not a card value")]
    InvalidValue { value: u8 },

    #[error("no hint stones remaining")]
    NoHintStones,

    #[error("all hint stones are already available; discarding is not allowed")]
    DiscardDisallowed,

    #[error("hint must include at least one card")]
    EmptyHint,

    #[error("cannot observe own hand")]
    SelfObservationForbidden,

    #[error("active card is only visible while a discard or play is being revealed")]
    ActiveCardHidden,
}

/// Errors returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("cannot draw from an empty deck")]
    EmptyDeck,

    #[error("{0} players is not supported (expected 2 to 5)")]
    InvalidPlayerCount(usize),

    #[error("invalid rules: {0}")]
    InvalidConfig(&'static str),

    #[error("invalid deck: {0}")]
    InvalidDeck(String),

    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl EngineError {
    /// True if this error is an agent contract breach.
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, EngineError::Protocol(_))
    }
}
