//! Standard 52-card deck and the card matching rule.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::GameRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    #[must_use]
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Scoring value: ace 1, number cards face value, court cards 10.
    #[must_use]
    pub fn value(self) -> u32 {
        match self {
            Rank::Ace => 1,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            other => other as u32 + 1,
        }
    }

    /// Rank 8 is wild.
    #[must_use]
    pub fn is_wild(self) -> bool {
        self == Rank::Eight
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ace => write!(f, "A"),
            Rank::Jack => write!(f, "J"),
            Rank::Queen => write!(f, "Q"),
            Rank::King => write!(f, "K"),
            other => write!(f, "{}", other.value()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(id: u8, suit: Suit, rank: Rank) -> Self {
        Self {
            id: CardId(id),
            suit,
            rank,
        }
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.rank.value()
    }

    #[must_use]
    pub fn is_red(&self) -> bool {
        self.suit.is_red()
    }

    /// Whether this card may be played on `top`: same suit, same rank, or wild.
    #[must_use]
    pub fn matches(&self, top: &Card) -> bool {
        self.suit == top.suit || self.rank == top.rank || self.rank.is_wild()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.rank, self.suit)
    }
}

/// All 52 cards in generation order (suit-major), ids assigned sequentially.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    let mut id = 0u8;
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(id, suit, rank));
            id += 1;
        }
    }
    deck
}

#[must_use]
pub fn generate_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut deck = standard_deck();
    rng.shuffle(&mut deck);
    deck
}

/// Points owed by a hand.
#[must_use]
pub fn hand_value(hand: &[Card]) -> u32 {
    hand.iter().map(Card::value).sum()
}
