//! The game server: sets up games, runs the turn loop, reports scores.
//!
//! A `Server` keeps one RNG for its whole lifetime, so a sequence of
//! shuffled games is reproducible from a single seed.
//!
//! ```
//! use hanabi_core::core::{EngineError, PlayerId};
//! use hanabi_core::engine::{Agent, EngineView, Server, TurnToken};
//!
//! /// Plays its oldest card every turn.
//! struct Reckless;
//!
//! impl Agent for Reckless {
//!     fn make_move(&mut self, _view: &EngineView<'_>, turn: &mut TurnToken<'_>) -> Result<(), EngineError> {
//!         turn.play(0)
//!     }
//! }
//!
//! let mut server = Server::default().with_seed(7);
//! let mut factory = |_: PlayerId, _: usize, _: usize| Box::new(Reckless) as Box<dyn Agent>;
//! let score = server.run_game(&mut factory, 3, 0, None).unwrap();
//! assert!(score <= 25);
//! ```

use im::Vector;
use tracing::{info, info_span, warn};

use crate::cards::{Card, Deck};
use crate::core::{hand_size_for, EngineError, GameRng, GameState, PlayerId, RulesConfig};

use super::agent::{Agent, AgentFactory};
use super::record::GameRecord;
use super::stats::ScoreSummary;
use super::turn::play_turn;

/// Runs games under one rule set.
#[derive(Debug, Default)]
pub struct Server {
    config: RulesConfig,
    rng: GameRng,
    last_game: Option<GameRecord>,
}

impl Server {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self {
            config,
            rng: GameRng::default(),
            last_game: None,
        }
    }

    /// Reseed, builder style.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed(seed);
        self
    }

    /// Reseed the shuffle RNG.
    pub fn seed(&mut self, seed: u64) {
        self.rng = GameRng::new(seed);
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Record of the most recent completed game.
    #[must_use]
    pub fn last_game(&self) -> Option<&GameRecord> {
        self.last_game.as_ref()
    }

    /// Play one game to the end and return its score.
    ///
    /// With `stacked_deck` the deck is drawn in exactly that order and the
    /// RNG is untouched; otherwise a fresh deck is shuffled. `game_number`
    /// only labels logs and the game record.
    ///
    /// Fails with `InvalidConfig` before dealing if the rules are unusable.
    /// Any protocol violation aborts the game with an error. Agents are
    /// handed back to the factory either way.
    pub fn run_game<F>(
        &mut self,
        factory: &mut F,
        player_count: usize,
        game_number: u32,
        stacked_deck: Option<&[Card]>,
    ) -> Result<u8, EngineError>
    where
        F: AgentFactory + ?Sized,
    {
        self.config.validate()?;
        let hand_size = hand_size_for(player_count)?;
        let span = info_span!("game", game = game_number, players = player_count);
        let _enter = span.enter();

        let (deck, rng_state) = match stacked_deck {
            Some(cards) => (Deck::stacked(cards)?, None),
            None => {
                let checkpoint = self.rng.state();
                (Deck::shuffled(&mut self.rng), Some(checkpoint))
            }
        };
        let initial_deck: Vec<Card> = deck.draw_order().collect();
        let mut state = GameState::deal(player_count, deck, self.config)?;

        let mut agents: Vec<Box<dyn Agent>> = PlayerId::all(player_count)
            .map(|player| factory.create(player, player_count, hand_size))
            .collect();

        let mut moves = Vector::new();
        let result = loop {
            if let Some(reason) = state.game_over() {
                break Ok(reason);
            }
            match play_turn(&mut state, &mut agents) {
                Ok(record) => moves.push_back(record),
                Err(err) => break Err(err),
            }
        };

        for agent in agents {
            factory.destroy(agent);
        }

        let end_reason = result.map_err(|err| {
            warn!(error = %err, turn = state.turn(), "game aborted");
            err
        })?;

        let final_score = state.score();
        info!(?end_reason, score = final_score, turns = state.turn(), "game over");

        self.last_game = Some(GameRecord {
            game_number,
            player_count,
            rng_state,
            initial_deck,
            moves,
            final_score,
            end_reason,
        });
        Ok(final_score)
    }

    /// Play `count` shuffled games back to back.
    pub fn run_games<F>(
        &mut self,
        factory: &mut F,
        player_count: usize,
        count: u32,
    ) -> Result<ScoreSummary, EngineError>
    where
        F: AgentFactory + ?Sized,
    {
        let mut summary = ScoreSummary::new();
        for game_number in 0..count {
            let score = self.run_game(factory, player_count, game_number, None)?;
            summary.record(score);
        }
        info!(games = summary.games, mean = summary.mean(), "batch complete");
        Ok(summary)
    }
}
