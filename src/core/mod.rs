//! Core engine types: players, RNG, configuration, errors, moves, state.
//!
//! Nothing in here calls into agents. The turn engine in `engine` drives
//! `GameState` and mediates what agents may see.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{CardIndices, Move, MoveKind};
pub use config::{hand_size_for, RulesConfig, DEFAULT_MULLIGANS, MAX_HINT_STONES, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{EngineError, ProtocolViolation};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, DEFAULT_SEED};
pub use state::{GameOverReason, GameState, MoveOutcome, PendingMove, Reveal};
