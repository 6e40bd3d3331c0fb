//! # hanabi-core
//!
//! Rules engine for a cooperative hidden-information card game in the
//! Hanabi family.
//!
//! Players hold hands they cannot see and build five colour piles from 1
//! to 5 together. They spend hint stones to tell teammates about their
//! cards, and each misplay costs a mulligan.
//!
//! ## Design Principles
//!
//! 1. **Agents Never Mutate State**: agents only receive shared borrows.
//!    Moves go through a single-use `TurnToken` and are applied by the
//!    engine after the callback returns.
//!
//! 2. **Visibility Is Per Observer**: every callback gets an `EngineView`
//!    fixed to one player's eyes. Reading your own hand is an error.
//!
//! 3. **Deterministic**: a seeded ChaCha RNG drives every shuffle, and a
//!    stacked deck makes a game fully scripted.
//!
//! ## Modules
//!
//! - `core`: players, RNG, rules configuration, errors, moves, game state
//! - `cards`: cards, colour piles, the draw deck
//! - `engine`: agents, views, the turn state machine, the server, records

pub mod cards;
pub mod core;
pub mod engine;

pub use crate::cards::{Card, Color, Deck, Pile, DECK_SIZE, PERFECT_SCORE};

pub use crate::core::{
    EngineError, GameOverReason, GameRng, GameState, Move, MoveKind, MoveOutcome, PlayerId,
    PlayerMap, ProtocolViolation, RulesConfig,
};

pub use crate::engine::{
    Agent, AgentFactory, EngineView, GameRecord, MoveRecord, Server, ScoreSummary, TurnPhase,
    TurnToken,
};
