//! Card model: cards, per-colour piles, and the draw deck.
//!
//! ## Key Types
//!
//! - `Card`: colour + value (1-5), freely copied
//! - `Pile`: consecutive values played for one colour
//! - `Deck`: ordered draw pile with seeded shuffle and stacked loading

pub mod card;
pub mod deck;
pub mod pile;

pub use card::{is_valid_value, Card, Color, DECK_SIZE, MAX_VALUE, NUM_COLORS, PERFECT_SCORE};
pub use deck::{check_composition, Deck};
pub use pile::Pile;
