//! Seats at the table.
//!
//! Turn order and broadcast order both follow ascending seat index, so
//! `PlayerId` is just that index and `PlayerMap` is a seat-indexed `Vec`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::MAX_PLAYERS;

/// A seat (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat to the left, wrapping around a table of `player_count`.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Every seat at a table of `player_count`, in turn order.
    ///
    /// ```
    /// use hanabi_core::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).map(PlayerId::index).collect();
    /// assert_eq!(seats, vec![0, 1, 2]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat.
///
/// ```
/// use hanabi_core::core::{PlayerId, PlayerMap};
///
/// let mut hands: PlayerMap<Vec<u8>> = PlayerMap::with_default(3);
/// hands[PlayerId::new(1)].push(4);
///
/// assert!(hands[PlayerId::new(0)].is_empty());
/// assert_eq!(hands.get(PlayerId::new(3)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Fill each seat from `init`.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` is 0 or larger than the biggest table.
    pub fn new(player_count: usize, init: impl FnMut(PlayerId) -> T) -> Self {
        assert!(
            (1..=MAX_PLAYERS).contains(&player_count),
            "table must seat 1 to {MAX_PLAYERS} players, got {player_count}"
        );
        Self {
            seats: PlayerId::all(player_count).map(init).collect(),
        }
    }

    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// `None` for a seat that is not at this table.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    /// Values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.seats[player.index()]
    }
}
