//! Shayeb, a crazy-eights style shedding game for four seats.
//!
//! The human sits at seat 0 against three bots. Play a card matching the
//! top discard by suit or rank (any 8 is wild) or draw one card. The first
//! empty hand wins the round and scores the value of every other hand;
//! the match goes to 100.

mod cards;
mod game;

pub use cards::{generate_deck, hand_value, standard_deck, Card, CardId, Rank, Suit};
pub use game::{ShayebGame, ShayebMove, ShayebState, SEAT_RANGE};
