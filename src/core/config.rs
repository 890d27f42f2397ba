//! Rules configuration.
//!
//! Every constant the engines depend on (hand sizes, timeouts, match
//! targets, prices, rewards, bot pacing) lives here with the arcade's
//! defaults. All structs deserialize with `#[serde(default)]`, so a host can
//! override a single field:
//!
//! ```
//! use arcade_rules::core::ArcadeConfig;
//!
//! let config = ArcadeConfig::default().with_match_target(50);
//! assert_eq!(config.domino.match_target, 50);
//! assert_eq!(config.shayeb.match_target, 50);
//! assert_eq!(config.domino.turn_seconds, 60);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Coins credited to the human seat when a match ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub win: u32,
    pub loss: u32,
}

impl Rewards {
    #[must_use]
    pub const fn new(win: u32, loss: u32) -> Self {
        Self { win, loss }
    }

    /// The payout for the human seat given the match outcome.
    #[must_use]
    pub fn for_outcome(&self, human_won: bool) -> u32 {
        if human_won {
            self.win
        } else {
            self.loss
        }
    }
}

/// Artificial delays that pace bot play. They never affect correctness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    pub bot_delay_ms: u64,
    pub auto_play_delay_ms: u64,
    pub round_restart_delay_ms: u64,
    /// How long the online lobby pretends to wait before seating bots.
    pub online_fallback_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            bot_delay_ms: 1000,
            auto_play_delay_ms: 800,
            round_restart_delay_ms: 2000,
            online_fallback_ms: 3000,
        }
    }
}

impl Pacing {
    /// Zero delays everywhere; handy for tests and headless simulation.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            bot_delay_ms: 0,
            auto_play_delay_ms: 0,
            round_restart_delay_ms: 0,
            online_fallback_ms: 0,
        }
    }

    #[must_use]
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    #[must_use]
    pub fn auto_play_delay(&self) -> Duration {
        Duration::from_millis(self.auto_play_delay_ms)
    }

    #[must_use]
    pub fn round_restart_delay(&self) -> Duration {
        Duration::from_millis(self.round_restart_delay_ms)
    }

    #[must_use]
    pub fn online_fallback(&self) -> Duration {
        Duration::from_millis(self.online_fallback_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DominoRules {
    pub hand_size: usize,
    pub turn_seconds: u64,
    pub match_target: u32,
    pub rewards: Rewards,
}

impl Default for DominoRules {
    fn default() -> Self {
        Self {
            hand_size: 7,
            turn_seconds: 60,
            match_target: 100,
            rewards: Rewards::new(100, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShayebRules {
    pub seats: usize,
    pub hand_size: usize,
    pub turn_seconds: u64,
    pub match_target: u32,
    pub rewards: Rewards,
}

impl Default for ShayebRules {
    fn default() -> Self {
        Self {
            seats: 4,
            hand_size: 5,
            turn_seconds: 30,
            match_target: 100,
            rewards: Rewards::new(500, 20),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LudoRules {
    pub turn_seconds: u64,
    /// Match-coin balance granted at the start of every match.
    pub starting_coins: u32,
    pub biased_roll_cost: u32,
    pub auto_play_cost: u32,
    pub rewards: Rewards,
}

impl Default for LudoRules {
    fn default() -> Self {
        Self {
            turn_seconds: 30,
            starting_coins: 1000,
            biased_roll_cost: 200,
            auto_play_cost: 500,
            rewards: Rewards::new(2000, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankRules {
    pub starting_money: i64,
    pub pass_start_bonus: i64,
    pub tax: i64,
    pub chance_gain: i64,
    pub chance_loss: i64,
    /// The bot only buys when at least this much money remains afterwards.
    pub bot_reserve: i64,
    pub rewards: Rewards,
}

impl Default for BankRules {
    fn default() -> Self {
        Self {
            starting_money: 1500,
            pass_start_bonus: 200,
            tax: 100,
            chance_gain: 100,
            chance_loss: 50,
            bot_reserve: 200,
            rewards: Rewards::new(200, 10),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChessRules {
    /// Shared display clock; it never decides a game.
    pub clock_seconds: u64,
    pub rewards: Rewards,
}

impl Default for ChessRules {
    fn default() -> Self {
        Self {
            clock_seconds: 600,
            rewards: Rewards::new(300, 0),
        }
    }
}

/// Complete arcade configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub pacing: Pacing,
    /// Global-currency price of auto-play in every game but Ludo.
    pub auto_play_price: u32,
    pub domino: DominoRules,
    pub shayeb: ShayebRules,
    pub ludo: LudoRules,
    pub bank: BankRules,
    pub chess: ChessRules,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::default(),
            auto_play_price: 200,
            domino: DominoRules::default(),
            shayeb: ShayebRules::default(),
            ludo: LudoRules::default(),
            bank: BankRules::default(),
            chess: ChessRules::default(),
        }
    }
}

impl ArcadeConfig {
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the points target for both accumulated games.
    #[must_use]
    pub fn with_match_target(mut self, target: u32) -> Self {
        self.domino.match_target = target;
        self.shayeb.match_target = target;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arcade() {
        let config = ArcadeConfig::default();
        assert_eq!(config.auto_play_price, 200);
        assert_eq!(config.domino.hand_size, 7);
        assert_eq!(config.shayeb.seats, 4);
        assert_eq!(config.ludo.turn_seconds, 30);
        assert_eq!(config.bank.starting_money, 1500);
        assert_eq!(config.chess.clock_seconds, 600);
        assert_eq!(config.pacing.bot_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_rewards_for_outcome() {
        let rewards = Rewards::new(500, 20);
        assert_eq!(rewards.for_outcome(true), 500);
        assert_eq!(rewards.for_outcome(false), 20);
    }

    #[test]
    fn test_partial_json_override() {
        let json = r#"{ "bank": { "starting_money": 900 }, "pacing": { "bot_delay_ms": 5 } }"#;
        let config: ArcadeConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.bank.starting_money, 900);
        assert_eq!(config.bank.pass_start_bonus, 200);
        assert_eq!(config.pacing.bot_delay_ms, 5);
        assert_eq!(config.pacing.round_restart_delay_ms, 2000);
        assert_eq!(config.auto_play_price, 200);
    }

    #[test]
    fn test_instant_pacing() {
        let pacing = Pacing::instant();
        assert_eq!(pacing.bot_delay(), Duration::ZERO);
        assert_eq!(pacing.online_fallback(), Duration::ZERO);
    }
}
