//! Turn engine and observer protocol.
//!
//! ## Key Types
//!
//! - `Agent` / `AgentFactory`: the player contract and how seats are filled
//! - `EngineView`: per-observer read-only window onto the game
//! - `TurnToken`: the active player's single-use right to move
//! - `Server`: runs whole games and records them
//! - `GameRecord` / `MoveRecord`: after-the-fact event log

pub mod agent;
pub mod record;
pub mod server;
pub mod stats;
pub mod turn;
pub mod view;

pub use agent::{Agent, AgentFactory};
pub use record::{GameRecord, MoveEvent, MoveRecord};
pub use server::Server;
pub use stats::ScoreSummary;
pub use turn::{TurnPhase, TurnToken};
pub use view::EngineView;
