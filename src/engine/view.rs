//! What an agent may see.
//!
//! An `EngineView` is built per callback with the observing player baked
//! in. There is no shared "current observer" to get out of sync: the view
//! handed to player 2 answers as player 2 for as long as it lives.
//!
//! ## Visibility rules
//!
//! - Other players' hands are readable; your own is not.
//! - The card being discarded or played is readable only while the
//!   before-discard / before-play broadcast is running.
//! - Everything else (piles, discards, stones, deck size) is public.

use std::fmt;

use im::Vector;
use rustc_hash::FxHashMap;

use crate::cards::{Card, Color, Pile};
use crate::core::{EngineError, GameState, PlayerId, ProtocolViolation, MAX_HINT_STONES};

use super::turn::TurnPhase;

/// Read-only, observer-gated window onto a game in progress.
///
/// `Debug` shows only the observer and phase; hands and deck stay hidden.
#[derive(Clone, Copy)]
pub struct EngineView<'a> {
    state: &'a GameState,
    observer: PlayerId,
    phase: TurnPhase,
    active_card: Option<Card>,
}

impl fmt::Debug for EngineView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineView")
            .field("observer", &self.observer)
            .field("phase", &self.phase)
            .field("turn", &self.state.turn())
            .finish_non_exhaustive()
    }
}

impl<'a> EngineView<'a> {
    pub(crate) fn new(
        state: &'a GameState,
        observer: PlayerId,
        phase: TurnPhase,
        active_card: Option<Card>,
    ) -> Self {
        Self {
            state,
            observer,
            phase,
            active_card,
        }
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.state.player_count()
    }

    /// Initial hand size for this table.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.state.hand_size()
    }

    /// The observing player.
    #[must_use]
    pub fn who_am_i(&self) -> PlayerId {
        self.observer
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.active_player()
    }

    /// Where in the turn this view was taken.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Turns completed so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn()
    }

    /// Number of cards `player` holds. Public for every seat, including
    /// the observer's own.
    pub fn hand_size_of_player(&self, player: PlayerId) -> Result<usize, EngineError> {
        self.state.hand(player).map(<[Card]>::len)
    }

    /// Another player's hand, oldest card first.
    pub fn hand_of_player(&self, player: PlayerId) -> Result<&'a [Card], EngineError> {
        if player == self.observer {
            return Err(ProtocolViolation::SelfObservationForbidden.into());
        }
        self.state.hand(player)
    }

    /// The card being discarded or played. Only available during the
    /// reveal broadcast of that move.
    pub fn active_card(&self) -> Result<Card, EngineError> {
        self.active_card
            .ok_or(EngineError::Protocol(ProtocolViolation::ActiveCardHidden))
    }

    #[must_use]
    pub fn pile_of(&self, color: Color) -> Pile {
        self.state.pile(color)
    }

    #[must_use]
    pub fn piles(&self) -> &'a [Pile; 5] {
        self.state.piles()
    }

    /// Every card discarded or misplayed, in order.
    #[must_use]
    pub fn discards(&self) -> &'a Vector<Card> {
        self.state.discards()
    }

    /// Copies of each card in the discard pile.
    #[must_use]
    pub fn discard_tally(&self) -> FxHashMap<Card, u8> {
        let mut tally = FxHashMap::default();
        for &card in self.state.discards() {
            *tally.entry(card).or_insert(0) += 1;
        }
        tally
    }

    /// Copies of `card` that are neither discarded nor on its pile.
    #[must_use]
    pub fn copies_remaining(&self, card: Card) -> usize {
        let discarded = self.state.discards().iter().filter(|&&c| c == card).count();
        let played = usize::from(self.state.pile(card.color).size() >= card.value);
        card.count() - discarded - played
    }

    #[must_use]
    pub fn hint_stones_used(&self) -> u8 {
        MAX_HINT_STONES - self.state.hint_stones()
    }

    #[must_use]
    pub fn hint_stones_remaining(&self) -> u8 {
        self.state.hint_stones()
    }

    #[must_use]
    pub fn mulligans_used(&self) -> u8 {
        self.state.config().max_mulligans - self.state.mulligans_remaining()
    }

    #[must_use]
    pub fn mulligans_remaining(&self) -> u8 {
        self.state.mulligans_remaining()
    }

    #[must_use]
    pub fn cards_remaining_in_deck(&self) -> usize {
        self.state.deck_len()
    }

    #[must_use]
    pub fn discarding_is_allowed(&self) -> bool {
        self.state.discarding_is_allowed()
    }

    /// Turns played since the deck ran out.
    #[must_use]
    pub fn final_countdown(&self) -> usize {
        self.state.final_countdown()
    }

    #[must_use]
    pub fn score(&self) -> u8 {
        self.state.score()
    }
}
