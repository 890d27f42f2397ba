//! In-match shop paid from the match-coin wallet.

use serde::{Deserialize, Serialize};

use crate::core::MoveError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceSkin {
    #[default]
    Standard,
    Fire,
    Ice,
    Gold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardTheme {
    #[default]
    Classic,
    Pharaonic,
    Romantic,
    Stone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopItem {
    AutoPlay,
    Dice(DiceSkin),
    Theme(BoardTheme),
}

impl ShopItem {
    /// Price in match coins. `auto_play_cost` comes from the rules table.
    #[must_use]
    pub fn price(self, auto_play_cost: u32) -> u32 {
        match self {
            ShopItem::AutoPlay => auto_play_cost,
            ShopItem::Dice(DiceSkin::Standard) | ShopItem::Theme(BoardTheme::Classic) => 0,
            ShopItem::Dice(DiceSkin::Fire | DiceSkin::Ice) => 200,
            ShopItem::Dice(DiceSkin::Gold) => 500,
            ShopItem::Theme(BoardTheme::Pharaonic) => 500,
            ShopItem::Theme(BoardTheme::Romantic) => 300,
            ShopItem::Theme(BoardTheme::Stone) => 200,
        }
    }
}

/// The human side's match coins and purchases. Discarded with the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: u32,
    pub auto_play: bool,
    pub dice: DiceSkin,
    pub theme: BoardTheme,
    owned: Vec<ShopItem>,
}

impl Wallet {
    #[must_use]
    pub fn new(coins: u32) -> Self {
        Self {
            coins,
            auto_play: false,
            dice: DiceSkin::default(),
            theme: BoardTheme::default(),
            owned: vec![ShopItem::Dice(DiceSkin::Standard), ShopItem::Theme(BoardTheme::Classic)],
        }
    }

    #[must_use]
    pub fn owns(&self, item: ShopItem) -> bool {
        (item == ShopItem::AutoPlay && self.auto_play) || self.owned.contains(&item)
    }

    /// Deduct `amount` or fail without touching the balance.
    pub fn spend(&mut self, amount: u32) -> Result<(), MoveError> {
        if self.coins < amount {
            return Err(MoveError::InsufficientCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    /// Buy and equip `item`. Re-selecting something already owned is free.
    pub fn buy(&mut self, item: ShopItem, auto_play_cost: u32) -> Result<(), MoveError> {
        if item == ShopItem::AutoPlay && self.auto_play {
            return Err(MoveError::Illegal("auto-play already bought"));
        }
        if !self.owns(item) {
            self.spend(item.price(auto_play_cost))?;
            if item != ShopItem::AutoPlay {
                self.owned.push(item);
            }
        }
        match item {
            ShopItem::AutoPlay => self.auto_play = true,
            ShopItem::Dice(skin) => self.dice = skin,
            ShopItem::Theme(theme) => self.theme = theme,
        }
        Ok(())
    }
}
