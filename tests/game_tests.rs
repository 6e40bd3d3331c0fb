//! Whole-game tests driven through the server.
//!
//! Stacked decks make each game fully scripted, so outcomes and the
//! observer log can be checked exactly.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{cards, deck_order, new_log, random_agents, scripted};
use hanabi_core::cards::{Card, Color, DECK_SIZE};
use hanabi_core::core::{EngineError, GameOverReason, Move, MoveKind, MoveOutcome, PlayerId, RulesConfig};
use hanabi_core::engine::{Agent, EngineView, GameRecord, Server, TurnPhase, TurnToken};

const P0: PlayerId = PlayerId::new(0);

/// Red and orange in hand, then yellow, green and blue arrive in play order.
/// Fillers at odd draws go to player 1 and are never played.
const PERFECT_PREFIX: &str = "1r 2r 3r 4r 5r 1o 2o 3o 4o 5o \
    1y 1g 2y 2g 3y 3g 4y 4g 5y 5g 1b 1r 2b 1r 3b 1o 4b 1o 5b";

fn perfect_scripts() -> Vec<Vec<Move>> {
    let p0 = vec![Move::Play { index: 0 }; 15];
    let mut p1 = vec![Move::Play { index: 0 }; 10];
    p1.extend([Move::ColorHint { target: P0, color: Color::Blue }; 4]);
    vec![p0, p1]
}

#[test]
fn test_perfect_score_game() {
    let log = new_log();
    let mut factory = scripted(perfect_scripts(), &log);
    let mut server = Server::default();

    let score = server
        .run_game(&mut factory, 2, 0, Some(deck_order(PERFECT_PREFIX).as_slice()))
        .unwrap();

    assert_eq!(score, 25);
    let record = server.last_game().unwrap();
    assert_eq!(record.end_reason, GameOverReason::PerfectScore);
    assert_eq!(record.moves.len(), 29);
    assert!(record.rng_state.is_none());

    let last = record.moves.last().unwrap();
    assert_eq!(last.player, P0);
    assert_eq!(
        last.outcome,
        MoveOutcome::Played { card: Card::new(Color::Blue, 5), regained_stone: true }
    );
    // 5r came back with every stone still available.
    assert_eq!(
        record.moves[8].outcome,
        MoveOutcome::Played { card: Card::new(Color::Red, 5), regained_stone: false }
    );

    let log = log.borrow();
    assert!(log.contains(&"0:color_hint 1->0 b [0, 1, 2, 3]".to_string()));
    assert!(log.contains(&"1:color_hint 1->0 b [0, 1, 2, 3]".to_string()));
}

#[test]
fn test_broadcast_order() {
    let log = new_log();
    let mut factory = scripted(perfect_scripts(), &log);
    let mut server = Server::default();
    server
        .run_game(&mut factory, 2, 0, Some(deck_order(PERFECT_PREFIX).as_slice()))
        .unwrap();

    let log = log.borrow();
    assert_eq!(
        &log[..7],
        &[
            "0:before_move",
            "1:before_move",
            "0:make_move",
            "0:before_play 0 #0 1r",
            "1:before_play 0 #0 1r",
            "0:after_move deck=39 score=1",
            "1:after_move deck=39 score=1",
        ]
    );
    // Only the active player is asked to move.
    assert_eq!(log[9], "1:make_move");
}

#[test]
fn test_deck_exhaustion_game() {
    struct Discarder;

    impl Agent for Discarder {
        fn make_move(&mut self, _view: &EngineView<'_>, turn: &mut TurnToken<'_>) -> Result<(), EngineError> {
            turn.discard(0)
        }
    }

    let mut factory = |_: PlayerId, _: usize, _: usize| Box::new(Discarder) as Box<dyn Agent>;
    let mut server = Server::new(RulesConfig::new().allow_discard_at_max_hints()).with_seed(9);

    let score = server.run_game(&mut factory, 2, 0, None).unwrap();

    let record = server.last_game().unwrap();
    assert_eq!(score, 0);
    assert_eq!(record.end_reason, GameOverReason::DeckExhausted);
    // 40 draws to empty the deck, then one more turn per player.
    assert_eq!(record.moves.len(), 42);
    assert!(record.moves.iter().all(|m| m.mv.kind() == MoveKind::Discard));
}

#[test]
fn test_discard_blocked_at_max_hints() {
    struct Discarder;

    impl Agent for Discarder {
        fn make_move(&mut self, _view: &EngineView<'_>, turn: &mut TurnToken<'_>) -> Result<(), EngineError> {
            turn.discard(0)
        }
    }

    let mut factory = |_: PlayerId, _: usize, _: usize| Box::new(Discarder) as Box<dyn Agent>;
    let mut server = Server::default();

    let result = server.run_game(&mut factory, 3, 0, None);

    assert_eq!(
        result,
        Err(EngineError::Protocol(hanabi_core::ProtocolViolation::DiscardDisallowed))
    );
    assert!(server.last_game().is_none());
}

#[test]
fn test_out_of_mulligans_game() {
    let log = new_log();
    let hint = Move::ColorHint { target: P0, color: Color::Red };
    let scripts = vec![vec![Move::Play { index: 0 }; 3], vec![hint; 2]];
    let mut factory = scripted(scripts, &log);
    let mut server = Server::default();

    let score = server
        .run_game(&mut factory, 2, 0, Some(deck_order("2r 2r 3r 3r 4r 1b 1b 1b 1g 1g").as_slice()))
        .unwrap();

    let record = server.last_game().unwrap();
    assert_eq!(score, 0);
    assert_eq!(record.end_reason, GameOverReason::OutOfMulligans);
    assert_eq!(record.moves.len(), 5);
    assert_eq!(
        record.moves[4].outcome,
        MoveOutcome::Misplayed { card: Card::new(Color::Red, 3) }
    );

    // The terminal misplay still draws a replacement.
    let log = log.borrow();
    assert_eq!(log.last().unwrap(), "1:after_move deck=37 score=0");
}

#[test]
fn test_first_hand_is_first_cards() {
    struct Watcher {
        seen: Rc<RefCell<Vec<Card>>>,
    }

    impl Agent for Watcher {
        fn observe_before_move(&mut self, view: &EngineView<'_>) -> Result<(), EngineError> {
            assert_eq!(view.phase(), TurnPhase::BroadcastingPreMove);
            if view.who_am_i() != P0 && view.turn() == 0 {
                *self.seen.borrow_mut() = view.hand_of_player(P0)?.to_vec();
            }
            Ok(())
        }

        fn make_move(&mut self, _view: &EngineView<'_>, turn: &mut TurnToken<'_>) -> Result<(), EngineError> {
            turn.play(0)
        }
    }

    let seen = Rc::new(RefCell::new(Vec::new()));
    let order = deck_order("3g 1b 4y 2o 5r");
    let shared = Rc::clone(&seen);
    let mut factory = move |_: PlayerId, _: usize, _: usize| {
        Box::new(Watcher { seen: Rc::clone(&shared) }) as Box<dyn Agent>
    };

    Server::default().run_game(&mut factory, 3, 0, Some(order.as_slice())).unwrap();

    assert_eq!(*seen.borrow(), cards("3g 1b 4y 2o 5r"));
}

#[test]
fn test_invalid_stacked_deck() {
    let mut factory = random_agents(0);
    let mut server = Server::default();

    let short = server.run_game(&mut factory, 2, 0, Some(cards("1r 2r 3r").as_slice()));
    assert!(matches!(short, Err(EngineError::InvalidDeck(_))));

    let mut wrong = deck_order("");
    wrong[0] = Card::new(Color::Blue, 5);
    let duplicated = server.run_game(&mut factory, 2, 0, Some(wrong.as_slice()));
    assert!(matches!(duplicated, Err(EngineError::InvalidDeck(_))));
}

#[test]
fn test_seeded_games_are_reproducible() {
    let run = |seed: u64| {
        let mut factory = random_agents(seed);
        let mut server = Server::default().with_seed(seed);
        server.run_game(&mut factory, 4, 0, None).unwrap();
        server.last_game().unwrap().clone()
    };

    let a = run(1234);
    let b = run(1234);
    assert_eq!(a, b);
    assert_eq!(a.initial_deck.len(), DECK_SIZE);
    assert_ne!(a.initial_deck, run(4321).initial_deck);
}

#[test]
fn test_record_survives_encoding() {
    let mut factory = random_agents(77);
    let mut server = Server::default().with_seed(77);
    server.run_game(&mut factory, 3, 12, None).unwrap();

    let record = server.last_game().unwrap();
    let decoded = GameRecord::decode(&record.encode().unwrap()).unwrap();

    assert_eq!(&decoded, record);
    assert_eq!(decoded.game_number, 12);
    assert_eq!(decoded.events().count(), decoded.moves.len());
}

#[test]
fn test_run_games_with_random_agents() {
    let mut factory = random_agents(5);
    let mut server = Server::default().with_seed(5);

    let summary = server.run_games(&mut factory, 5, 10).unwrap();

    assert_eq!(summary.games, 10);
    assert!(summary.min <= summary.max);
    assert!(summary.mean() <= 25.0);
    assert_eq!(summary.histogram.values().sum::<u32>(), 10);
}
