//! Card-shedding rules through the public engine API.

use arcade_rules::core::{ArcadeConfig, GameRng, MoveError, PlayerId, PlayerMap, ShayebRules};
use arcade_rules::games::shayeb::{
    generate_deck, standard_deck, Card, CardId, Rank, ShayebGame, ShayebMove, ShayebState, Suit, SEAT_RANGE,
};
use arcade_rules::rules::{RoundResult, TurnBasedEngine};

fn table(hands: Vec<Vec<Card>>, top: Card, deck: Vec<Card>) -> ShayebState {
    ShayebState {
        deck,
        discard: vec![top],
        hands: PlayerMap::from_vec(hands),
        active: PlayerId::HUMAN,
    }
}

fn filler(id: u8) -> Vec<Card> {
    vec![Card::new(id, Suit::Spades, Rank::King)]
}

/// Top 7 of hearts: an 8 of clubs is wild, a 5 of clubs does not match.
#[test]
fn test_wild_eight_on_seven_of_hearts() {
    let game = ShayebGame::default();
    let eight = Card::new(33, Suit::Clubs, Rank::Eight);
    let five = Card::new(30, Suit::Clubs, Rank::Five);
    let top = Card::new(6, Suit::Hearts, Rank::Seven);
    let state = table(
        vec![vec![eight, five], filler(50), filler(51), filler(49)],
        top,
        vec![],
    );

    let legal = game.legal_moves(&state, PlayerId::HUMAN);
    assert_eq!(legal, vec![ShayebMove::Play { card: eight.id }]);

    let mut rng = GameRng::new(1);
    assert!(matches!(
        game.apply(&state, PlayerId::HUMAN, &ShayebMove::Play { card: five.id }, &mut rng),
        Err(MoveError::Illegal(_))
    ));

    let next = game
        .apply(&state, PlayerId::HUMAN, &ShayebMove::Play { card: eight.id }, &mut rng)
        .unwrap();
    assert_eq!(next.top(), Some(&eight));
    assert_eq!(next.active, PlayerId::new(1));
    assert_eq!(state.hand(PlayerId::HUMAN).len(), 2);
}

#[test]
fn test_deal_four_seats() {
    let game = ShayebGame::default();
    let state = game.deal(&mut GameRng::new(3));
    for seat in PlayerId::all(4) {
        assert_eq!(state.hand(seat).len(), 5);
    }
    assert_eq!(state.discard.len(), 1);
    assert_eq!(state.deck.len(), 52 - 20 - 1);
    assert_eq!(game.player_count(), 4);
}

#[test]
fn test_seat_count_from_config_is_clamped() {
    let config: ArcadeConfig = serde_json::from_str(r#"{ "shayeb": { "seats": 0 } }"#).unwrap();
    let game = ShayebGame::new(config.shayeb);
    assert_eq!(game.player_count(), 2);
    let state = game.deal(&mut GameRng::new(1));
    assert_eq!(state.hands.player_count(), 2);

    let crowded = ShayebGame::new(ShayebRules {
        seats: 40,
        ..ShayebRules::default()
    });
    assert_eq!(crowded.player_count(), *SEAT_RANGE.end());
    let state = crowded.deal(&mut GameRng::new(1));
    assert_eq!(state.discard.len(), 1);
}

#[test]
fn test_deck_has_52_distinct_cards() {
    assert_eq!(standard_deck().len(), 52);

    let mut ids: Vec<CardId> = generate_deck(&mut GameRng::new(2))
        .iter()
        .map(|c| c.id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 52);
}

#[test]
fn test_draw_rotates_and_empty_deck_stalls() {
    let game = ShayebGame::default();
    let mut rng = GameRng::new(1);
    let top = Card::new(0, Suit::Hearts, Rank::Ace);
    let spare = Card::new(40, Suit::Spades, Rank::Two);
    let state = table(
        vec![filler(51), filler(50), filler(49), filler(48)],
        top,
        vec![spare],
    );

    let next = game.apply(&state, PlayerId::HUMAN, &ShayebMove::Draw, &mut rng).unwrap();
    assert_eq!(next.hand(PlayerId::HUMAN).len(), 2);
    assert_eq!(next.active, PlayerId::new(1));

    assert_eq!(
        game.apply(&next, PlayerId::new(1), &ShayebMove::Draw, &mut rng),
        Err(MoveError::PileExhausted)
    );
    assert!(game.legal_moves(&next, PlayerId::new(1)).is_empty());
    assert_eq!(game.choose_bot_move(&next, PlayerId::new(1), &mut rng), None);
}

#[test]
fn test_going_out_scores_other_hands() {
    let game = ShayebGame::default();
    let mut rng = GameRng::new(1);
    let top = Card::new(0, Suit::Hearts, Rank::Ace);
    let last = Card::new(4, Suit::Hearts, Rank::Five);
    let state = table(
        vec![
            vec![last],
            vec![Card::new(12, Suit::Hearts, Rank::King)],
            vec![Card::new(14, Suit::Diamonds, Rank::Two)],
            vec![Card::new(26, Suit::Clubs, Rank::Ace)],
        ],
        top,
        vec![],
    );

    let next = game
        .apply(&state, PlayerId::HUMAN, &ShayebMove::Play { card: last.id }, &mut rng)
        .unwrap();
    assert_eq!(next.active, PlayerId::HUMAN);
    assert_eq!(game.round_result(&next), Some(RoundResult::won(PlayerId::HUMAN, 13)));
}

#[test]
fn test_out_of_turn_rejected() {
    let game = ShayebGame::default();
    let mut rng = GameRng::new(5);
    let state = game.deal(&mut rng);
    assert_eq!(
        game.apply(&state, PlayerId::new(2), &ShayebMove::Draw, &mut rng),
        Err(MoveError::OutOfTurn {
            player: PlayerId::new(2),
            active: PlayerId::HUMAN
        })
    );
}
