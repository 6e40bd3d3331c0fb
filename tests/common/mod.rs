//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use hanabi_core::cards::{Card, Color, Deck};
use hanabi_core::core::{CardIndices, EngineError, GameRng, Move, PlayerId};
use hanabi_core::engine::{Agent, EngineView, TurnToken};

/// Parse a space-separated card list such as `"1r 2r 5b"`.
pub fn cards(list: &str) -> Vec<Card> {
    list.split_whitespace().map(|s| s.parse().unwrap()).collect()
}

/// A full 50-card draw order starting with `prefix`, the rest canonical.
pub fn deck_order(prefix: &str) -> Vec<Card> {
    Deck::stacked_prefix(&cards(prefix)).unwrap().draw_order().collect()
}

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Fails the game if the active card is readable outside a reveal.
fn require_hidden(view: &EngineView<'_>) -> Result<(), EngineError> {
    match view.active_card() {
        Ok(_) => Err(EngineError::InvalidState("active card visible outside a reveal")),
        Err(_) => Ok(()),
    }
}

/// Plays a fixed list of moves and logs every callback it receives.
///
/// Runs out of moves by returning without moving.
pub struct ScriptedAgent {
    moves: VecDeque<Move>,
    log: Log,
}

impl ScriptedAgent {
    pub fn new(moves: impl IntoIterator<Item = Move>, log: Log) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            log,
        }
    }

    fn note(&self, view: &EngineView<'_>, entry: String) {
        self.log
            .borrow_mut()
            .push(format!("{}:{entry}", view.who_am_i().0));
    }
}

impl Agent for ScriptedAgent {
    fn observe_before_move(&mut self, view: &EngineView<'_>) -> Result<(), EngineError> {
        require_hidden(view)?;
        self.note(view, "before_move".to_string());
        Ok(())
    }

    fn make_move(&mut self, view: &EngineView<'_>, turn: &mut TurnToken<'_>) -> Result<(), EngineError> {
        require_hidden(view)?;
        self.note(view, "make_move".to_string());
        match self.moves.pop_front() {
            Some(mv) => turn.submit(mv),
            None => Ok(()),
        }
    }

    fn observe_before_discard(
        &mut self,
        view: &EngineView<'_>,
        actor: PlayerId,
        index: usize,
    ) -> Result<(), EngineError> {
        let card = view.active_card()?;
        self.note(view, format!("before_discard {} #{index} {card}", actor.0));
        Ok(())
    }

    fn observe_before_play(
        &mut self,
        view: &EngineView<'_>,
        actor: PlayerId,
        index: usize,
    ) -> Result<(), EngineError> {
        let card = view.active_card()?;
        self.note(view, format!("before_play {} #{index} {card}", actor.0));
        Ok(())
    }

    fn observe_color_hint(
        &mut self,
        view: &EngineView<'_>,
        actor: PlayerId,
        target: PlayerId,
        color: Color,
        matches: &CardIndices,
    ) -> Result<(), EngineError> {
        require_hidden(view)?;
        self.note(
            view,
            format!("color_hint {}->{} {} {:?}", actor.0, target.0, color.initial(), matches.as_slice()),
        );
        Ok(())
    }

    fn observe_value_hint(
        &mut self,
        view: &EngineView<'_>,
        actor: PlayerId,
        target: PlayerId,
        value: u8,
        matches: &CardIndices,
    ) -> Result<(), EngineError> {
        require_hidden(view)?;
        self.note(
            view,
            format!("value_hint {}->{} {value} {:?}", actor.0, target.0, matches.as_slice()),
        );
        Ok(())
    }

    fn observe_after_move(&mut self, view: &EngineView<'_>) -> Result<(), EngineError> {
        require_hidden(view)?;
        self.note(
            view,
            format!("after_move deck={} score={}", view.cards_remaining_in_deck(), view.score()),
        );
        Ok(())
    }
}

/// Factory handing each seat its own script, all sharing one log.
pub fn scripted(scripts: Vec<Vec<Move>>, log: &Log) -> impl FnMut(PlayerId, usize, usize) -> Box<dyn Agent> {
    let log = Rc::clone(log);
    move |player, _, _| {
        Box::new(ScriptedAgent::new(scripts[player.index()].clone(), Rc::clone(&log))) as Box<dyn Agent>
    }
}

/// Picks a uniformly random legal move each turn.
///
/// Hints are always built from a card the target actually holds, so they
/// never match zero cards.
pub struct RandomLegalAgent {
    rng: GameRng,
}

impl RandomLegalAgent {
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    fn below(&mut self, n: usize) -> usize {
        self.rng.next_u32() as usize % n
    }

    fn choose(&mut self, view: &EngineView<'_>) -> Result<Move, EngineError> {
        let me = view.who_am_i();
        let own_cards = view.hand_size_of_player(me)?;

        let mut kinds = vec![0];
        if view.discarding_is_allowed() {
            kinds.push(1);
        }
        if view.hint_stones_remaining() > 0 {
            kinds.push(2);
        }

        Ok(match kinds[self.below(kinds.len())] {
            0 => Move::Play { index: self.below(own_cards) },
            1 => Move::Discard { index: self.below(own_cards) },
            _ => {
                let offset = 1 + self.below(view.num_players() - 1);
                let target = PlayerId::new(((me.index() + offset) % view.num_players()) as u8);
                let hand = view.hand_of_player(target)?;
                let card = hand[self.below(hand.len())];
                if self.below(2) == 0 {
                    Move::ColorHint { target, color: card.color }
                } else {
                    Move::ValueHint { target, value: card.value }
                }
            }
        })
    }
}

impl Agent for RandomLegalAgent {
    fn make_move(&mut self, view: &EngineView<'_>, turn: &mut TurnToken<'_>) -> Result<(), EngineError> {
        let mv = self.choose(view)?;
        turn.submit(mv)
    }
}

/// Factory of random agents, each seeded from `seed` and its seat.
pub fn random_agents(seed: u64) -> impl FnMut(PlayerId, usize, usize) -> Box<dyn Agent> {
    move |player, _, _| Box::new(RandomLegalAgent::new(seed ^ u64::from(player.0))) as Box<dyn Agent>
}
