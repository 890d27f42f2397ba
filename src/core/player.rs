//! Player identification, seats, and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Two-sided games use `PlayerId(0)` for the human
//! and `PlayerId(1)` for the computer; the card game uses four seats.
//!
//! ## PlayerMap
//!
//! Per-player data backed by a `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## Seat
//!
//! Who controls a side (human or computer) and whether auto-play is on.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier. Indices are 0-based; seat 0 is always the local human.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The local human seat.
    pub const HUMAN: PlayerId = PlayerId(0);

    /// The computer seat in two-sided games.
    pub const COMPUTER: PlayerId = PlayerId(1);

    /// Seat `id`.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one in clockwise order.
    ///
    /// ```
    /// use arcade_rules::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
    /// assert_eq!(PlayerId::HUMAN.next(2), PlayerId::COMPUTER);
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Who drives a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    Human,
    Computer,
}

/// A side at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub name: String,
    pub controller: Controller,
    /// Auto-play: the bot heuristic acts on behalf of a human seat.
    pub auto_play: bool,
}

impl Seat {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
            auto_play: false,
        }
    }

    pub fn computer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Computer,
            auto_play: false,
        }
    }

    /// Whether the bot heuristic picks this seat's moves.
    #[must_use]
    pub fn is_bot_driven(&self) -> bool {
        self.controller == Controller::Computer || self.auto_play
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// ## Example
///
/// ```
/// use arcade_rules::core::{PlayerId, PlayerMap};
///
/// let mut money: PlayerMap<i64> = PlayerMap::with_value(2, 1500);
/// money[PlayerId::COMPUTER] -= 200;
/// assert_eq!(money[PlayerId::HUMAN], 1500);
/// assert_eq!(money[PlayerId::COMPUTER], 1300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Fill each seat from `factory`.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "a table needs at least one seat");
        assert!(player_count <= 255, "seat ids are u8; at most 255 seats");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Every seat starts with a clone of `value`.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Build from an existing vector, one entry per seat.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "a table needs at least one seat");
        assert!(data.len() <= 255, "seat ids are u8; at most 255 seats");
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Seat order, starting with the human.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
