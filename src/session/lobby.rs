//! "Online" room stub.
//!
//! There is no transport. Hosting hands out a 4-digit room code, joining
//! accepts any well-formed one, and once the fallback delay has passed the
//! room fills with computer opponents.

use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::core::{GameRng, Pacing, PlayerId, PlayerMap, Seat};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("room code must be 4 digits, got {0:?}")]
    InvalidCode(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lobby {
    code: String,
    waited: Duration,
    fallback: Duration,
}

impl Lobby {
    /// Open a room with a fresh code in 1000..=9999.
    pub fn host(rng: &mut GameRng, pacing: &Pacing) -> Self {
        let code = (1000 + rng.gen_range(0..9000)).to_string();
        info!(%code, "room hosted");
        Self::open(code, pacing)
    }

    pub fn join(code: &str, pacing: &Pacing) -> Result<Self, LobbyError> {
        if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LobbyError::InvalidCode(code.to_string()));
        }
        info!(%code, "room joined");
        Ok(Self::open(code.to_string(), pacing))
    }

    fn open(code: String, pacing: &Pacing) -> Self {
        Self {
            code,
            waited: Duration::ZERO,
            fallback: pacing.online_fallback(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Let time pass. Returns the seating once nobody showed up in time:
    /// seat 0 stays human, everyone else is a computer.
    pub fn poll(&mut self, elapsed: Duration, player_count: usize) -> Option<PlayerMap<Seat>> {
        self.waited += elapsed;
        if self.waited < self.fallback {
            return None;
        }
        info!(code = %self.code, "no peer found, falling back to computer play");
        Some(PlayerMap::new(player_count, |p| {
            if p == PlayerId::HUMAN {
                Seat::human("You")
            } else {
                Seat::computer(format!("Guest {}", p.0))
            }
        }))
    }
}
