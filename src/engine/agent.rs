//! The agent contract.
//!
//! Agents are the players. The engine calls them one at a time, in seat
//! order, and each callback receives an [`EngineView`] fixed to that
//! agent's eyes. Only `make_move` is required; observation callbacks
//! default to doing nothing.
//!
//! Any `Err` returned from a callback aborts the game. That lets an agent
//! use `?` on view accessors: peeking at its own hand is a bug, not a
//! recoverable condition.

use crate::cards::Color;
use crate::core::{CardIndices, EngineError, PlayerId};

use super::turn::TurnToken;
use super::view::EngineView;

/// A player in the game.
pub trait Agent {
    /// Every agent, before the active player chooses.
    fn observe_before_move(&mut self, _view: &EngineView<'_>) -> Result<(), EngineError> {
        Ok(())
    }

    /// The active player's turn. Exactly one move must be submitted
    /// through `turn`.
    fn make_move(&mut self, view: &EngineView<'_>, turn: &mut TurnToken<'_>) -> Result<(), EngineError>;

    /// `actor` is about to discard the card at `index`. The card is
    /// readable through [`EngineView::active_card`] during this call.
    fn observe_before_discard(
        &mut self,
        _view: &EngineView<'_>,
        _actor: PlayerId,
        _index: usize,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// `actor` is about to play the card at `index`. The card is readable
    /// through [`EngineView::active_card`] during this call.
    fn observe_before_play(
        &mut self,
        _view: &EngineView<'_>,
        _actor: PlayerId,
        _index: usize,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// `actor` told `target` that the cards at `matches` are `color`.
    fn observe_color_hint(
        &mut self,
        _view: &EngineView<'_>,
        _actor: PlayerId,
        _target: PlayerId,
        _color: Color,
        _matches: &CardIndices,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// `actor` told `target` that the cards at `matches` are `value`s.
    fn observe_value_hint(
        &mut self,
        _view: &EngineView<'_>,
        _actor: PlayerId,
        _target: PlayerId,
        _value: u8,
        _matches: &CardIndices,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// Every agent, once the move has fully taken effect.
    fn observe_after_move(&mut self, _view: &EngineView<'_>) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Creates the agents for a game and takes them back when it ends.
pub trait AgentFactory {
    fn create(&mut self, player: PlayerId, player_count: usize, hand_size: usize) -> Box<dyn Agent>;

    fn destroy(&mut self, agent: Box<dyn Agent>) {
        drop(agent);
    }
}

/// Any `FnMut(player, player_count, hand_size) -> Box<dyn Agent>` is a factory.
impl<F> AgentFactory for F
where
    F: FnMut(PlayerId, usize, usize) -> Box<dyn Agent>,
{
    fn create(&mut self, player: PlayerId, player_count: usize, hand_size: usize) -> Box<dyn Agent> {
        self(player, player_count, hand_size)
    }
}
