//! One turn, step by step.
//!
//! ```text
//! AwaitingTurn -> BroadcastingPreMove -> AwaitingMove -> BroadcastingEffect
//!     -> ApplyingEffect -> BroadcastingPostMove -> AdvancingTurn -> AwaitingTurn
//! ```
//!
//! A move is only accepted through the [`TurnToken`] handed to the active
//! agent during `AwaitingMove`. The token starts out awaiting a move and
//! moves to accepted (or violated) on the first submission; it cannot go
//! back. Agents only ever hold shared borrows of the state, so they have no
//! way to call back into the engine from inside a callback.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, Color};
use crate::core::{EngineError, GameState, Move, PendingMove, PlayerId, ProtocolViolation};

use super::agent::Agent;
use super::record::{MoveEvent, MoveRecord};
use super::view::EngineView;

/// Where the engine is within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingTurn,
    BroadcastingPreMove,
    AwaitingMove,
    BroadcastingEffect,
    ApplyingEffect,
    BroadcastingPostMove,
    AdvancingTurn,
    GameOver,
}

#[derive(Debug)]
enum TokenState {
    Awaiting,
    Accepted(PendingMove),
    Violated(EngineError),
}

/// The active player's right to make exactly one move.
///
/// Each move method validates immediately and returns the violation, if
/// any. The first violation sticks: even if the agent ignores the error,
/// the engine aborts the game with it once `make_move` returns.
pub struct TurnToken<'a> {
    state: &'a GameState,
    token: TokenState,
}

impl fmt::Debug for TurnToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.token {
            TokenState::Awaiting => "awaiting",
            TokenState::Accepted(_) => "accepted",
            TokenState::Violated(_) => "violated",
        };
        f.debug_struct("TurnToken")
            .field("status", &status)
            .finish_non_exhaustive()
    }
}

impl<'a> TurnToken<'a> {
    pub(crate) fn new(state: &'a GameState) -> Self {
        Self {
            state,
            token: TokenState::Awaiting,
        }
    }

    /// Submit a move.
    pub fn submit(&mut self, mv: Move) -> Result<(), EngineError> {
        let outcome = match &self.token {
            TokenState::Awaiting => self.state.validate(mv),
            TokenState::Accepted(_) => Err(ProtocolViolation::MovedTwice.into()),
            TokenState::Violated(first) => return Err(first.clone()),
        };

        match outcome {
            Ok(pending) => {
                self.token = TokenState::Accepted(pending);
                Ok(())
            }
            Err(err) => {
                self.token = TokenState::Violated(err.clone());
                Err(err)
            }
        }
    }

    pub fn discard(&mut self, index: usize) -> Result<(), EngineError> {
        self.submit(Move::Discard { index })
    }

    pub fn play(&mut self, index: usize) -> Result<(), EngineError> {
        self.submit(Move::Play { index })
    }

    pub fn give_color_hint(&mut self, target: PlayerId, color: Color) -> Result<(), EngineError> {
        self.submit(Move::ColorHint { target, color })
    }

    pub fn give_value_hint(&mut self, target: PlayerId, value: u8) -> Result<(), EngineError> {
        self.submit(Move::ValueHint { target, value })
    }

    /// True once a move has been accepted.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        matches!(self.token, TokenState::Accepted(_))
    }

    pub(crate) fn finish(self) -> Result<PendingMove, EngineError> {
        match self.token {
            TokenState::Awaiting => Err(ProtocolViolation::NoMove.into()),
            TokenState::Accepted(pending) => Ok(pending),
            TokenState::Violated(err) => Err(err),
        }
    }
}

/// Show every agent, in seat order, a view taken at `phase`.
fn broadcast(
    state: &GameState,
    agents: &mut [Box<dyn Agent>],
    phase: TurnPhase,
    active_card: Option<Card>,
    mut notify: impl FnMut(&mut Box<dyn Agent>, &EngineView<'_>) -> Result<(), EngineError>,
) -> Result<(), EngineError> {
    for (seat, agent) in agents.iter_mut().enumerate() {
        let view = EngineView::new(state, PlayerId::new(seat as u8), phase, active_card);
        notify(agent, &view)?;
    }
    Ok(())
}

/// Run the active player's turn to completion.
///
/// On success the state has advanced to the next player. On error the
/// game must be abandoned; the state is left wherever the violation was
/// detected, which is never partway through a mutation.
pub(crate) fn play_turn(
    state: &mut GameState,
    agents: &mut [Box<dyn Agent>],
) -> Result<MoveRecord, EngineError> {
    let actor = state.active_player();
    let turn = state.turn();

    broadcast(state, agents, TurnPhase::BroadcastingPreMove, None, |agent, view| {
        agent.observe_before_move(view)
    })?;

    let pending = {
        let view = EngineView::new(state, actor, TurnPhase::AwaitingMove, None);
        let mut token = TurnToken::new(state);
        let replied = agents[actor.index()].make_move(&view, &mut token);
        let pending = token.finish();
        replied?;
        pending?
    };

    let mv = pending.mv();
    let revealed = pending.revealed_card();
    match (mv, pending.hint_matches()) {
        (Move::Discard { index }, _) => {
            broadcast(state, agents, TurnPhase::BroadcastingEffect, revealed, |agent, view| {
                agent.observe_before_discard(view, actor, index)
            })?;
        }
        (Move::Play { index }, _) => {
            broadcast(state, agents, TurnPhase::BroadcastingEffect, revealed, |agent, view| {
                agent.observe_before_play(view, actor, index)
            })?;
        }
        (Move::ColorHint { target, color }, Some(matches)) => {
            broadcast(state, agents, TurnPhase::BroadcastingEffect, None, |agent, view| {
                agent.observe_color_hint(view, actor, target, color, matches)
            })?;
        }
        (Move::ValueHint { target, value }, Some(matches)) => {
            broadcast(state, agents, TurnPhase::BroadcastingEffect, None, |agent, view| {
                agent.observe_value_hint(view, actor, target, value, matches)
            })?;
        }
        (Move::ColorHint { .. } | Move::ValueHint { .. }, None) => {
            return Err(EngineError::InvalidState("hint validated without matches"));
        }
    }

    let event = MoveEvent::new(mv, revealed);
    let outcome = state.apply(pending)?;
    debug!(player = %actor, %mv, ?outcome, "move applied");

    broadcast(state, agents, TurnPhase::BroadcastingPostMove, None, |agent, view| {
        agent.observe_after_move(view)
    })?;

    state.end_turn()?;

    Ok(MoveRecord {
        turn,
        player: actor,
        mv,
        event,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::core::RulesConfig;

    fn state() -> GameState {
        let prefix: Vec<Card> = "1r 2r 3r 4r 5r 1b 1b 1g 2g 3o"
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        GameState::deal(2, Deck::stacked_prefix(&prefix).unwrap(), RulesConfig::default()).unwrap()
    }

    #[test]
    fn test_token_accepts_one_move() {
        let state = state();
        let mut token = TurnToken::new(&state);

        assert!(!token.has_moved());
        token.play(0).unwrap();
        assert!(token.has_moved());

        let pending = token.finish().unwrap();
        assert_eq!(pending.mv(), Move::Play { index: 0 });
        assert_eq!(pending.revealed_card(), Some("1r".parse().unwrap()));
    }

    #[test]
    fn test_token_rejects_second_move() {
        let state = state();
        let mut token = TurnToken::new(&state);

        token.give_value_hint(PlayerId::new(1), 1).unwrap();
        assert_eq!(token.discard(0), Err(ProtocolViolation::MovedTwice.into()));
        assert_eq!(token.finish(), Err(ProtocolViolation::MovedTwice.into()));
    }

    #[test]
    fn test_token_debug_hides_pending_card() {
        let state = state();
        let mut token = TurnToken::new(&state);
        token.play(0).unwrap();

        let shown = format!("{token:?}");
        assert_eq!(shown, "TurnToken { status: \"accepted\", .. }");
    }

    #[test]
    fn test_token_without_move() {
        let state = state();
        let token = TurnToken::new(&state);

        assert_eq!(token.finish(), Err(ProtocolViolation::NoMove.into()));
    }

    #[test]
    fn test_first_violation_sticks() {
        let state = state();
        let mut token = TurnToken::new(&state);

        assert_eq!(
            token.give_color_hint(PlayerId::new(0), Color::Red),
            Err(ProtocolViolation::HintToSelf.into())
        );
        // A legal retry does not clear the violation.
        assert_eq!(token.play(0), Err(ProtocolViolation::HintToSelf.into()));
        assert!(!token.has_moved());
        assert_eq!(token.finish(), Err(ProtocolViolation::HintToSelf.into()));
    }
}
