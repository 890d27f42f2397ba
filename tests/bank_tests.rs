//! Bank/property rules through the public engine API.

use arcade_rules::core::{GameRng, MoveError, PlayerId};
use arcade_rules::games::bank::{tile, BankGame, BankMove, BankPhase, BankState, Landing, TileKind};
use arcade_rules::rules::{RoundResult, TurnBasedEngine};

/// Holding 150 and landing on a property priced above that: no purchase
/// is offered and no money moves.
#[test]
fn test_unaffordable_property_is_not_bought() {
    let game = BankGame::default();
    let mut start = BankState::new(150);
    // Every tile one die away from 13 is a 280+ property or jail.
    start.positions[PlayerId::HUMAN] = 13;

    let mut saw_refusal = false;
    for seed in 0..30 {
        let mut rng = GameRng::new(seed);
        let next = game.apply(&start, PlayerId::HUMAN, &BankMove::Roll, &mut rng).unwrap();
        let landed = next.positions[PlayerId::HUMAN];

        assert_eq!(next.money[PlayerId::HUMAN], 150);
        assert_eq!(next.phase, BankPhase::AwaitingRoll);
        assert_eq!(next.active, PlayerId::COMPUTER);
        if let Some(TileKind::Property { price, .. }) = tile(landed).map(|t| t.kind) {
            assert!(price > 150);
            assert_eq!(next.landing, Some(Landing::CannotAfford { tile: landed }));
            saw_refusal = true;
        }
        assert!(game.apply(&next, PlayerId::COMPUTER, &BankMove::Buy, &mut rng).is_err());
    }
    assert!(saw_refusal);
}

#[test]
fn test_offer_then_buy() {
    let game = BankGame::default();
    let start = BankState::new(1500);
    // One die from 0 reaches 1..=6: property, chance, property, jail, property.
    let mut rng = GameRng::new(21);
    loop {
        let next = game.apply(&start, PlayerId::HUMAN, &BankMove::Roll, &mut rng).unwrap();
        if let BankPhase::AwaitingBuyDecision { tile: index } = next.phase {
            assert_eq!(game.legal_moves(&next, PlayerId::HUMAN), vec![BankMove::Buy, BankMove::Decline]);
            let Some(TileKind::Property { price, .. }) = tile(index).map(|t| t.kind) else {
                panic!("offer on a non-property tile");
            };
            let bought = game.apply(&next, PlayerId::HUMAN, &BankMove::Buy, &mut rng).unwrap();
            assert_eq!(bought.money[PlayerId::HUMAN], 1500 - price);
            assert_eq!(bought.owners[index], Some(PlayerId::HUMAN));
            assert_eq!(bought.active, PlayerId::COMPUTER);
            break;
        }
    }
}

#[test]
fn test_passing_start_pays_bonus() {
    let game = BankGame::default();
    let mut start = BankState::new(1000);
    start.positions[PlayerId::HUMAN] = 19;
    let mut rng = GameRng::new(2);

    let next = game.apply(&start, PlayerId::HUMAN, &BankMove::Roll, &mut rng).unwrap();
    assert!(next.passed_start);
    let landed = next.positions[PlayerId::HUMAN];
    assert_eq!(landed, usize::from(next.last_roll.unwrap()) - 1);
    // 1200 after the bonus; only the chance tile on 3 moves money again.
    assert!([1150, 1200, 1300].contains(&next.money[PlayerId::HUMAN]));
}

#[test]
fn test_bankruptcy_ends_the_round() {
    let game = BankGame::default();
    let mut state = BankState::new(1500);
    state.money[PlayerId::COMPUTER] = -10;
    state.active = PlayerId::COMPUTER;

    assert_eq!(game.round_result(&state), Some(RoundResult::won(PlayerId::HUMAN, 0)));
    assert!(game.legal_moves(&state, PlayerId::COMPUTER).is_empty());
    assert_eq!(game.choose_bot_move(&state, PlayerId::COMPUTER, &mut GameRng::new(1)), None);
    assert_eq!(
        game.apply(&state, PlayerId::COMPUTER, &BankMove::Roll, &mut GameRng::new(1)),
        Err(MoveError::NotPlaying)
    );
}
