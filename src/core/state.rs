//! Game state and the rules that mutate it.
//!
//! `GameState` holds everything about a game in progress, hidden
//! information included. It is owned by the turn engine; agents only ever
//! see it through an [`EngineView`](crate::engine::EngineView).
//!
//! A move goes through two steps:
//! 1. [`GameState::validate`] checks legality without touching anything and
//!    returns a [`PendingMove`] carrying what the move reveals.
//! 2. [`GameState::apply`] consumes the `PendingMove` and mutates.
//!
//! So a rejected move never leaves a half-applied state behind.
//!
//! ## Card conservation
//!
//! After every transition, `deck + hands + discards + Σ pile sizes == 50`.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::action::{CardIndices, Move};
use super::config::{hand_size_for, RulesConfig, MAX_HINT_STONES};
use super::error::{EngineError, ProtocolViolation};
use super::player::{PlayerId, PlayerMap};
use crate::cards::{is_valid_value, Card, Color, Deck, Pile, MAX_VALUE, PERFECT_SCORE};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The deck ran out and every player had their final turn.
    DeckExhausted,
    /// The last mulligan was spent.
    OutOfMulligans,
    /// All five piles are complete.
    PerfectScore,
}

/// What a validated move reveals before it takes effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// The card being discarded or played.
    Card(Card),
    /// Hand positions matched by a hint.
    Hint(CardIndices),
}

/// A move that passed validation and has not been applied yet.
///
/// Only [`GameState::validate`] creates one, and [`GameState::apply`]
/// consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingMove {
    actor: PlayerId,
    mv: Move,
    reveal: Reveal,
    turn: u32,
}

impl PendingMove {
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        self.actor
    }

    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }

    #[must_use]
    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    /// The card a discard or play is about to remove from the hand.
    #[must_use]
    pub fn revealed_card(&self) -> Option<Card> {
        match self.reveal {
            Reveal::Card(card) => Some(card),
            Reveal::Hint(_) => None,
        }
    }

    /// The indices a hint will point at.
    #[must_use]
    pub fn hint_matches(&self) -> Option<&CardIndices> {
        match &self.reveal {
            Reveal::Hint(indices) => Some(indices),
            Reveal::Card(_) => None,
        }
    }
}

/// Result of applying a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Discarded { card: Card, regained_stone: bool },
    Played { card: Card, regained_stone: bool },
    Misplayed { card: Card },
    Hinted { matches: usize },
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    player_count: usize,
    hand_size: usize,
    config: RulesConfig,

    deck: Deck,
    hands: PlayerMap<Vec<Card>>,
    piles: [Pile; 5],
    /// Append-only; persistent so views and records can share it cheaply.
    discards: Vector<Card>,

    hint_stones: u8,
    mulligans: u8,
    /// Turns completed since the deck ran out.
    final_countdown: usize,

    active_player: PlayerId,
    /// Turns completed so far.
    turn: u32,
    /// Whether the active player's move has been applied this turn.
    moved: bool,
}

impl GameState {
    /// Set up a game: piles empty, stones full, hands dealt from `deck`.
    ///
    /// Each player draws their whole hand in seat order, so with a stacked
    /// deck player 0 holds the first `hand_size` cards.
    pub fn deal(player_count: usize, mut deck: Deck, config: RulesConfig) -> Result<Self, EngineError> {
        let hand_size = hand_size_for(player_count)?;

        let mut hands: PlayerMap<Vec<Card>> = PlayerMap::with_default(player_count);
        for player in PlayerId::all(player_count) {
            for _ in 0..hand_size {
                let card = deck.draw()?;
                hands[player].push(card);
            }
        }

        Ok(Self {
            player_count,
            hand_size,
            config,
            deck,
            hands,
            piles: Color::ALL.map(Pile::new),
            discards: Vector::new(),
            hint_stones: MAX_HINT_STONES,
            mulligans: config.max_mulligans,
            final_countdown: 0,
            active_player: PlayerId::new(0),
            turn: 0,
            moved: false,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Initial hand size for this table.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    /// Turns completed so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// A player's hand, oldest card first.
    pub fn hand(&self, player: PlayerId) -> Result<&[Card], EngineError> {
        self.hands
            .get(player)
            .map(Vec::as_slice)
            .ok_or_else(|| ProtocolViolation::PlayerOutOfRange { player }.into())
    }

    #[must_use]
    pub fn pile(&self, color: Color) -> Pile {
        self.piles[color.index()]
    }

    #[must_use]
    pub fn piles(&self) -> &[Pile; 5] {
        &self.piles
    }

    #[must_use]
    pub fn discards(&self) -> &Vector<Card> {
        &self.discards
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn hint_stones(&self) -> u8 {
        self.hint_stones
    }

    #[must_use]
    pub fn mulligans_remaining(&self) -> u8 {
        self.mulligans
    }

    #[must_use]
    pub fn final_countdown(&self) -> usize {
        self.final_countdown
    }

    /// Sum of pile sizes.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.piles.iter().map(Pile::size).sum()
    }

    /// Whether a discard would currently be accepted.
    #[must_use]
    pub fn discarding_is_allowed(&self) -> bool {
        self.config.allow_discard_at_max_hints || self.hint_stones < MAX_HINT_STONES
    }

    /// Cards accounted for across deck, hands, discards and piles.
    #[must_use]
    pub fn card_total(&self) -> usize {
        self.deck.len()
            + self.hands.values().map(Vec::len).sum::<usize>()
            + self.discards.len()
            + self.piles.iter().map(|p| p.size() as usize).sum::<usize>()
    }

    /// Why the game is over, or `None` while it continues.
    ///
    /// Checked in order: deck exhausted with the final round played, out of
    /// mulligans, perfect score.
    #[must_use]
    pub fn game_over(&self) -> Option<GameOverReason> {
        if self.deck.is_empty() && self.final_countdown == self.player_count + 1 {
            Some(GameOverReason::DeckExhausted)
        } else if self.mulligans == 0 {
            Some(GameOverReason::OutOfMulligans)
        } else if self.score() == PERFECT_SCORE {
            Some(GameOverReason::PerfectScore)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_over().is_some()
    }

    // === Move validation ===

    /// Check `mv` for the active player without mutating anything.
    pub fn validate(&self, mv: Move) -> Result<PendingMove, EngineError> {
        if self.moved {
            return Err(ProtocolViolation::MovedTwice.into());
        }
        let actor = self.active_player;
        let hand = &self.hands[actor];

        let reveal = match mv {
            Move::Discard { index } => {
                let card = card_at(hand, index)?;
                if !self.discarding_is_allowed() {
                    return Err(ProtocolViolation::DiscardDisallowed.into());
                }
                Reveal::Card(card)
            }
            Move::Play { index } => Reveal::Card(card_at(hand, index)?),
            Move::ColorHint { target, color } => {
                Reveal::Hint(self.check_hint(actor, target, |c| c.color == color)?)
            }
            Move::ValueHint { target, value } => {
                if !is_valid_value(value) {
                    return Err(ProtocolViolation::InvalidValue { value }.into());
                }
                Reveal::Hint(self.check_hint(actor, target, |c| c.value == value)?)
            }
        };

        Ok(PendingMove {
            actor,
            mv,
            reveal,
            turn: self.turn,
        })
    }

    fn check_hint(
        &self,
        actor: PlayerId,
        target: PlayerId,
        pred: impl Fn(&Card) -> bool,
    ) -> Result<CardIndices, EngineError> {
        let target_hand = self.hand(target)?;
        if target == actor {
            return Err(ProtocolViolation::HintToSelf.into());
        }
        if self.hint_stones == 0 {
            return Err(ProtocolViolation::NoHintStones.into());
        }
        let indices = CardIndices::matching(target_hand, pred);
        if indices.is_empty() && !self.config.allow_empty_hints {
            return Err(ProtocolViolation::EmptyHint.into());
        }
        Ok(indices)
    }

    // === Transitions ===

    /// Apply a validated move for the active player.
    pub fn apply(&mut self, pending: PendingMove) -> Result<MoveOutcome, EngineError> {
        if pending.turn != self.turn || pending.actor != self.active_player {
            return Err(EngineError::InvalidState("pending move belongs to another turn"));
        }
        if self.moved {
            return Err(ProtocolViolation::MovedTwice.into());
        }
        let actor = pending.actor;

        let outcome = match pending.mv {
            Move::Discard { index } => {
                let card = self.hands[actor].remove(index);
                self.discards.push_back(card);
                self.draw_replacement(actor);
                let regained_stone = self.regain_hint_stone();
                MoveOutcome::Discarded { card, regained_stone }
            }
            Move::Play { index } => {
                let card = self.hands[actor].remove(index);
                let pile = &mut self.piles[card.color.index()];
                let outcome = if pile.next_value_is(card.value) {
                    pile.increment()?;
                    let regained_stone = card.value == MAX_VALUE && self.regain_hint_stone();
                    MoveOutcome::Played { card, regained_stone }
                } else {
                    self.discards.push_back(card);
                    self.lose_mulligan()?;
                    MoveOutcome::Misplayed { card }
                };
                self.draw_replacement(actor);
                outcome
            }
            Move::ColorHint { .. } | Move::ValueHint { .. } => {
                self.hint_stones -= 1;
                let matches = pending.hint_matches().map_or(0, CardIndices::len);
                MoveOutcome::Hinted { matches }
            }
        };

        self.moved = true;
        debug_assert_eq!(self.card_total(), crate::cards::DECK_SIZE);
        Ok(outcome)
    }

    /// Pass the turn to the next seat and tick the final countdown.
    pub fn end_turn(&mut self) -> Result<(), EngineError> {
        if !self.moved {
            return Err(ProtocolViolation::NoMove.into());
        }
        self.moved = false;
        self.turn += 1;
        self.active_player = self.active_player.next(self.player_count);
        if self.deck.is_empty() {
            self.final_countdown += 1;
        }
        Ok(())
    }

    /// A replacement is drawn whenever the deck has cards, including after
    /// the play that spends the last mulligan. Termination is only checked
    /// once the turn ends, so that draw is visible in the final state.
    fn draw_replacement(&mut self, player: PlayerId) {
        if let Ok(card) = self.deck.draw() {
            trace!(%player, %card, remaining = self.deck.len(), "drew replacement");
            self.hands[player].push(card);
        }
    }

    fn regain_hint_stone(&mut self) -> bool {
        if self.hint_stones < MAX_HINT_STONES {
            self.hint_stones += 1;
            debug!(hint_stones = self.hint_stones, "hint stone returned");
            true
        } else {
            false
        }
    }

    fn lose_mulligan(&mut self) -> Result<(), EngineError> {
        self.mulligans = self
            .mulligans
            .checked_sub(1)
            .ok_or(EngineError::InvalidState("no mulligans left to lose"))?;
        debug!(mulligans = self.mulligans, "mulligan lost");
        Ok(())
    }
}

fn card_at(hand: &[Card], index: usize) -> Result<Card, EngineError> {
    hand.get(index).copied().ok_or_else(|| {
        ProtocolViolation::CardIndexOutOfRange {
            index,
            hand_size: hand.len(),
        }
        .into()
    })
}
