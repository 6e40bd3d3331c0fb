//! Score statistics over a batch of games.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::PERFECT_SCORE;

/// Aggregate results of several games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Games recorded.
    pub games: u32,

    /// Sum of all final scores.
    pub total: u64,

    /// Lowest score seen (0 when no games).
    pub min: u8,

    /// Highest score seen.
    pub max: u8,

    /// Games that reached 25.
    pub perfect_games: u32,

    /// Final score -> number of games.
    pub histogram: FxHashMap<u8, u32>,
}

impl ScoreSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one game's final score.
    pub fn record(&mut self, score: u8) {
        self.min = if self.games == 0 { score } else { self.min.min(score) };
        self.max = self.max.max(score);
        self.games += 1;
        self.total += u64::from(score);
        if score == PERFECT_SCORE {
            self.perfect_games += 1;
        }
        *self.histogram.entry(score).or_insert(0) += 1;
    }

    /// Mean final score.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total as f64 / f64::from(self.games)
        }
    }
}
