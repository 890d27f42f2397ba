//! Session flows against the real engines: bot pacing, timeouts, round
//! restarts, match end, exit and stale callbacks.

use std::time::Duration;

use arcade_rules::core::{ArcadeConfig, GameRng, GameStatus, Pacing, PlayerId};
use arcade_rules::games::chess::ChessMove;
use arcade_rules::games::domino::{DominoMove, TileId};
use arcade_rules::games::ludo::{BoardTheme, LudoMove, ShopItem};
use arcade_rules::games::shayeb::ShayebMove;
use arcade_rules::rules::TurnBasedEngine;
use arcade_rules::session::{Lobby, Session, SessionEvent};
use arcade_rules::{BankGame, ChessGame, DominoGame, LudoGame, ShayebGame};

/// Tick with zero elapsed time until the match ends or `max_ticks` runs out.
fn run_instant<E: TurnBasedEngine>(session: &mut Session<E>, max_ticks: usize) {
    for _ in 0..max_ticks {
        if session.status() == GameStatus::GameOver {
            return;
        }
        session.tick(Duration::ZERO);
    }
}

fn match_end(events: &[SessionEvent]) -> Option<(Option<PlayerId>, u32)> {
    events.iter().find_map(|e| match *e {
        SessionEvent::MatchEnded {
            winner,
            coins_reward,
        } => Some((winner, coins_reward)),
        _ => None,
    })
}

#[test]
fn test_domino_human_move_then_bot_reply() {
    let mut session = Session::vs_computer(DominoGame::default(), GameRng::new(42), Pacing::default());
    session.drain_events();

    let mv = session
        .engine()
        .legal_moves(session.state(), PlayerId::HUMAN)
        .into_iter()
        .next()
        .unwrap();
    session.submit_move(PlayerId::HUMAN, mv);
    assert_eq!(session.active(), PlayerId::COMPUTER);
    assert_eq!(session.state().board.len(), 1);
    assert_eq!(
        session.drain_events(),
        vec![SessionEvent::TurnChanged {
            active: PlayerId::COMPUTER
        }]
    );

    session.tick(Duration::from_millis(500));
    assert_eq!(session.active(), PlayerId::COMPUTER);
    session.tick(Duration::from_millis(500));
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history()[1].player, PlayerId::COMPUTER);
}

#[test]
fn test_illegal_and_out_of_turn_moves_are_ignored() {
    let mut session = Session::vs_computer(DominoGame::default(), GameRng::new(3), Pacing::default());
    session.drain_events();
    let before = session.state().clone();

    let bogus = DominoMove::Play {
        tile: TileId(200),
        end: None,
    };
    session.submit_move(PlayerId::HUMAN, bogus);
    session.submit_move(PlayerId::COMPUTER, DominoMove::Pass);

    assert_eq!(session.state(), &before);
    assert_eq!(session.active(), PlayerId::HUMAN);
    assert!(session.history().is_empty());
    assert!(session.drain_events().is_empty());
    assert_eq!(session.pending_tasks(), 0);
}

#[test]
fn test_turn_timeout_hands_over_and_bot_follows() {
    let mut session = Session::vs_computer(DominoGame::default(), GameRng::new(5), Pacing::default());
    let hand_before = session.state().hand(PlayerId::HUMAN).to_vec();

    session.tick(Duration::from_secs(59));
    assert_eq!(session.active(), PlayerId::HUMAN);
    session.tick(Duration::from_secs(1));
    assert_eq!(session.active(), PlayerId::COMPUTER);
    assert_eq!(session.state().hand(PlayerId::HUMAN), hand_before.as_slice());
    assert!(session.history().is_empty());

    session.tick(Duration::from_secs(1));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.active(), PlayerId::HUMAN);
    assert_eq!(session.turn().clock.remaining(), Duration::from_secs(60));
}

#[test]
fn test_domino_auto_play_match_runs_to_target() {
    let config = ArcadeConfig::default().with_pacing(Pacing::instant());
    let mut session = Session::from_config(DominoGame::new(config.domino.clone()), GameRng::new(11), &config);
    session.buy_auto_play(PlayerId::HUMAN);
    run_instant(&mut session, 20_000);

    assert_eq!(session.status(), GameStatus::GameOver);
    let events = session.drain_events();
    let (winner, reward) = match_end(&events).unwrap();
    let winner = winner.unwrap();
    assert!(session.score().total(winner) >= 100);
    assert_eq!(reward, if winner == PlayerId::HUMAN { 100 } else { 0 });

    let started = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::RoundStarted { .. }))
        .count();
    assert_eq!(started as u32, session.score().rounds_played());
    let spent = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::CoinsSpent { amount: 200, .. }))
        .count();
    assert_eq!(spent, 1);
    assert_eq!(session.pending_tasks(), 0);
}

#[test]
fn test_ludo_single_round_match() {
    let mut session = Session::vs_computer(LudoGame::default(), GameRng::new(2), Pacing::instant());
    session.set_auto_play(PlayerId::HUMAN, true);
    run_instant(&mut session, 20_000);

    assert_eq!(session.status(), GameStatus::GameOver);
    assert_eq!(session.score().rounds_played(), 1);
    let (winner, reward) = match_end(&session.drain_events()).unwrap();
    assert_eq!(reward, if winner == Some(PlayerId::HUMAN) { 2000 } else { 0 });
    let result = session.engine().round_result(session.state()).unwrap();
    assert_eq!(result.winner, winner);
}

#[test]
fn test_shayeb_bots_take_turns_in_seat_order() {
    let mut session = Session::vs_computer(ShayebGame::default(), GameRng::new(8), Pacing::default());
    assert_eq!(session.seats().player_count(), 4);

    session.submit_move(PlayerId::HUMAN, ShayebMove::Draw);
    assert_eq!(session.active(), PlayerId::new(1));

    for seat in 1..4u8 {
        session.tick(Duration::from_secs(1));
        assert_eq!(session.history()[usize::from(seat)].player, PlayerId::new(seat));
    }
    if session.status() == GameStatus::Playing {
        assert_eq!(session.active(), PlayerId::HUMAN);
    }
}

#[test]
fn test_chess_clock_is_decorative() {
    let mut session = Session::vs_computer(ChessGame::default(), GameRng::new(1), Pacing::default());
    session.tick(Duration::from_secs(700));
    assert_eq!(session.active(), PlayerId::HUMAN);
    assert_eq!(session.turn().clock.remaining(), Duration::ZERO);
    assert!(session.history().is_empty());

    session.submit_move(PlayerId::HUMAN, ChessMove::parse("e2", "e4").unwrap());
    session.tick(Duration::from_secs(1));
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.active(), PlayerId::HUMAN);
}

#[test]
fn test_exit_cancels_pending_bot_move() {
    let mut session = Session::vs_computer(BankGame::default(), GameRng::new(4), Pacing::default());
    session.set_auto_play(PlayerId::HUMAN, true);
    assert_eq!(session.pending_tasks(), 1);
    session.drain_events();

    session.exit(PlayerId::HUMAN);
    let snapshot = session.state().clone();
    session.tick(Duration::from_secs(10));

    assert_eq!(session.state(), &snapshot);
    assert!(session.history().is_empty());
    assert_eq!(
        session.drain_events(),
        vec![SessionEvent::MatchEnded {
            winner: Some(PlayerId::COMPUTER),
            coins_reward: 10
        }]
    );
}

#[test]
fn test_turning_auto_play_off_drops_queued_move() {
    let mut session = Session::vs_computer(DominoGame::default(), GameRng::new(6), Pacing::default());
    session.set_auto_play(PlayerId::HUMAN, true);
    session.set_auto_play(PlayerId::HUMAN, false);
    session.tick(Duration::from_secs(1));
    assert!(session.history().is_empty());
    assert_eq!(session.active(), PlayerId::HUMAN);
}

#[test]
fn test_initialize_resets_match() {
    let mut session = Session::vs_computer(DominoGame::default(), GameRng::new(9), Pacing::default());
    let mv = session.engine().legal_moves(session.state(), PlayerId::HUMAN)[0];
    session.submit_move(PlayerId::HUMAN, mv);
    session.drain_events();

    let seats = session.seats().clone();
    assert!(session.initialize(seats).is_ok());
    assert!(session.history().is_empty());
    assert_eq!(session.active(), PlayerId::HUMAN);
    assert_eq!(session.pending_tasks(), 0);
    assert_eq!(session.score().rounds_played(), 0);
    assert_eq!(
        session.drain_events(),
        vec![
            SessionEvent::RoundStarted { round: 1 },
            SessionEvent::TurnChanged {
                active: PlayerId::HUMAN
            }
        ]
    );
}

#[test]
fn test_online_lobby_falls_back_to_bots() {
    let pacing = Pacing::default();
    let mut rng = GameRng::new(12);
    let mut lobby = Lobby::host(&mut rng, &pacing);
    assert_eq!(lobby.code().len(), 4);

    let game = ShayebGame::default();
    assert!(lobby.poll(Duration::from_secs(1), game.player_count()).is_none());
    let seats = lobby
        .poll(Duration::from_secs(2), game.player_count())
        .unwrap();

    let mut session = Session::new(game, seats, rng, pacing).unwrap();
    assert!(session.seats().iter().skip(1).all(|(_, s)| s.is_bot_driven()));
    assert_eq!(
        session.drain_events()[0],
        SessionEvent::RoundStarted { round: 1 }
    );
}

#[test]
fn test_instant_bot_match_returns_from_tick() {
    let mut session = Session::vs_computer(ChessGame::default(), GameRng::new(7), Pacing::instant());
    session.set_auto_play(PlayerId::HUMAN, true);

    for played in 1..=40 {
        session.tick(Duration::ZERO);
        if session.status() != GameStatus::Playing {
            break;
        }
        assert_eq!(session.history().len(), played);
    }
}

#[test]
fn test_ludo_shop_purchase_keeps_turn_clock_running() {
    let mut session = Session::vs_computer(LudoGame::default(), GameRng::new(2), Pacing::default());
    let classic = LudoMove::Buy(ShopItem::Theme(BoardTheme::Classic));

    session.tick(Duration::from_secs(20));
    session.submit_move(PlayerId::HUMAN, classic);
    assert_eq!(session.turn().clock.remaining(), Duration::from_secs(10));
    assert!(session.history().is_empty());

    session.tick(Duration::from_secs(10));
    assert_eq!(session.active(), PlayerId::COMPUTER);
    assert!(session.history().is_empty());

    // Shopping during the computer's turn does not push its move back.
    session.tick(Duration::from_millis(900));
    session.submit_move(PlayerId::HUMAN, classic);
    assert_eq!(session.pending_tasks(), 1);
    session.tick(Duration::from_millis(100));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].player, PlayerId::COMPUTER);
    assert_eq!(session.state().wallet.coins, 1000);
}

#[test]
fn test_ludo_auto_play_purchase_hands_seat_to_bot() {
    let game = LudoGame::default();
    let cost = game.rules().auto_play_cost;
    let mut session = Session::vs_computer(game, GameRng::new(3), Pacing::default());
    let coins = session.state().wallet.coins;

    session.submit_move(PlayerId::HUMAN, LudoMove::Buy(ShopItem::AutoPlay));
    assert_eq!(session.state().wallet.coins, coins - cost);
    assert!(session.seats()[PlayerId::HUMAN].auto_play);
    assert_eq!(session.pending_tasks(), 1);
    assert!(session.history().is_empty());

    session.tick(Pacing::default().auto_play_delay());
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].player, PlayerId::HUMAN);
    assert!(!session
        .drain_events()
        .iter()
        .any(|e| matches!(e, SessionEvent::CoinsSpent { .. })));
}
