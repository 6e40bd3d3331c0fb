//! Rule configuration.
//!
//! The table rules that vary between rule sets are collected in
//! `RulesConfig`. Everything else (deck composition, the hint-stone pool,
//! hand sizes) is fixed.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Size of the shared hint-stone pool.
pub const MAX_HINT_STONES: u8 = 8;

/// Mulligans available under the default rules.
pub const DEFAULT_MULLIGANS: u8 = 3;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 5;

/// Initial hand size: 5 cards for 2-3 players, 4 cards for 4-5 players.
pub fn hand_size_for(player_count: usize) -> Result<usize, EngineError> {
    match player_count {
        2..=3 => Ok(5),
        4..=5 => Ok(4),
        n => Err(EngineError::InvalidPlayerCount(n)),
    }
}

/// Rule toggles for a game.
///
/// Deserializes with defaults for missing fields, so `{}` is the
/// standard rule set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Failed plays tolerated before the game ends.
    pub max_mulligans: u8,

    /// Whether a hint may match zero cards.
    pub allow_empty_hints: bool,

    /// Whether discarding is allowed while all hint stones are available.
    pub allow_discard_at_max_hints: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_mulligans: DEFAULT_MULLIGANS,
            allow_empty_hints: false,
            allow_discard_at_max_hints: false,
        }
    }
}

impl RulesConfig {
    /// Standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mulligan ceiling.
    #[must_use]
    pub fn with_max_mulligans(mut self, mulligans: u8) -> Self {
        assert!(mulligans > 0, "Must allow at least 1 mulligan");
        self.max_mulligans = mulligans;
        self
    }

    /// Reject rule sets no game can be played under. Deserialized configs
    /// bypass the builder, so the server checks this before every game.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_mulligans == 0 {
            return Err(EngineError::InvalidConfig("max_mulligans must be at least 1"));
        }
        Ok(())
    }

    /// Permit hints that match no cards.
    #[must_use]
    pub fn allow_empty_hints(mut self) -> Self {
        self.allow_empty_hints = true;
        self
    }

    /// Permit discarding even when no hint stone can be regained.
    #[must_use]
    pub fn allow_discard_at_max_hints(mut self) -> Self {
        self.allow_discard_at_max_hints = true;
        self
    }
}
