//! Host-facing match object.
//!
//! A `Session` owns the only mutable copy of a game's state. Everything that
//! changes it goes through here: human moves, bot moves, turn timeouts and
//! round restarts. Rejected moves are logged and otherwise ignored, so the
//! host never has to handle an error from play.
//!
//! Time is virtual. The host calls `tick` with however much wall time has
//! passed; the turn clock and every queued callback run off that.

use im::Vector;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, trace};

use super::events::{SessionEvent, Task};
use crate::core::{
    ArcadeConfig, ClockPolicy, GameRng, GameStatus, MoveRecord, Pacing, PlayerId, PlayerMap, Seat, TurnState,
};
use crate::rules::{MatchDecision, MatchScore, RoundResult, TurnBasedEngine};
use crate::schedule::Scheduler;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{game} seats {expected} players, got {got} seats")]
    SeatCount {
        game: &'static str,
        expected: usize,
        got: usize,
    },
}

pub struct Session<E: TurnBasedEngine> {
    engine: E,
    seats: PlayerMap<Seat>,
    auto_play_owned: PlayerMap<bool>,
    state: E::State,
    rng: GameRng,
    turn: TurnState,
    score: MatchScore,
    scheduler: Scheduler<Task>,
    history: Vector<MoveRecord<E::Move>>,
    events: Vec<SessionEvent>,
    pacing: Pacing,
    auto_play_price: u32,
}

impl<E: TurnBasedEngine> Session<E> {
    /// Seat 0 is the human, every other seat a computer.
    pub fn vs_computer(engine: E, rng: GameRng, pacing: Pacing) -> Self {
        let seats = PlayerMap::new(engine.player_count(), |p| {
            if p == PlayerId::HUMAN {
                Seat::human("You")
            } else {
                Seat::computer(format!("Bot {}", p.0))
            }
        });
        Self::start(engine, seats, rng, pacing)
    }

    /// Start a match with explicit seats. Deals the first round immediately.
    pub fn new(engine: E, seats: PlayerMap<Seat>, rng: GameRng, pacing: Pacing) -> Result<Self, SessionError> {
        check_seats(&engine, &seats)?;
        Ok(Self::start(engine, seats, rng, pacing))
    }

    fn start(engine: E, seats: PlayerMap<Seat>, mut rng: GameRng, pacing: Pacing) -> Self {
        let player_count = engine.player_count();
        let state = engine.deal(&mut rng);
        let turn = TurnState::new(engine.active_player(&state), engine.clock_policy());

        let mut session = Self {
            engine,
            seats,
            auto_play_owned: PlayerMap::with_value(player_count, false),
            state,
            rng,
            turn,
            score: MatchScore::new(player_count),
            scheduler: Scheduler::new(),
            history: Vector::new(),
            events: Vec::new(),
            pacing,
            auto_play_price: ArcadeConfig::default().auto_play_price,
        };
        session.begin_round();
        session
    }

    /// Like `vs_computer`, with pacing and the auto-play price from `config`.
    pub fn from_config(engine: E, rng: GameRng, config: &ArcadeConfig) -> Self {
        Self::vs_computer(engine, rng, config.pacing.clone()).with_auto_play_price(config.auto_play_price)
    }

    #[must_use]
    pub fn with_auto_play_price(mut self, price: u32) -> Self {
        self.auto_play_price = price;
        self
    }

    /// Throw away the match in progress and deal a fresh one for `seats`.
    pub fn initialize(&mut self, seats: PlayerMap<Seat>) -> Result<&E::State, SessionError> {
        check_seats(&self.engine, &seats)?;
        self.scheduler.cancel_all();
        self.seats = seats;
        self.score = MatchScore::new(self.engine.player_count());
        self.history = Vector::new();
        self.state = self.engine.deal(&mut self.rng);
        self.turn = TurnState::new(self.engine.active_player(&self.state), self.engine.clock_policy());
        self.begin_round();
        Ok(&self.state)
    }

    // === Accessors ===

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn state(&self) -> &E::State {
        &self.state
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.turn.status
    }

    pub fn active(&self) -> PlayerId {
        self.turn.active
    }

    pub fn score(&self) -> &MatchScore {
        &self.score
    }

    pub fn seats(&self) -> &PlayerMap<Seat> {
        &self.seats
    }

    pub fn history(&self) -> &Vector<MoveRecord<E::Move>> {
        &self.history
    }

    /// Virtual time since the session was created.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Queued callbacks that are still live.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Take every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // === External contract ===

    /// Attempt a move. Illegal or out-of-turn requests leave everything as
    /// it was.
    ///
    /// Side actions (shop purchases) change the state but leave the turn
    /// clock, queued bot moves and the history alone.
    pub fn submit_move(&mut self, player: PlayerId, mv: E::Move) -> &E::State {
        if !self.turn.is_playing() {
            debug!(game = self.engine.name(), %player, status = ?self.turn.status, "move outside play ignored");
            return &self.state;
        }

        let next = match self.engine.apply(&self.state, player, &mv, &mut self.rng) {
            Ok(next) => next,
            Err(error) => {
                debug!(game = self.engine.name(), %player, ?mv, %error, "move rejected");
                return &self.state;
            }
        };
        let bought_auto_play = self.engine.auto_play_bought(&self.state, &next, player);

        if self.engine.is_side_action(&mv) {
            trace!(game = self.engine.name(), %player, ?mv, "side action");
            self.state = next;
        } else {
            let sequence = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
            self.history
                .push_back(MoveRecord::new(player, mv, self.turn.round, sequence));
            self.state = next;
            self.after_transition();
        }

        if bought_auto_play {
            info!(game = self.engine.name(), %player, "auto-play bought in match");
            self.auto_play_owned[player] = true;
            self.set_auto_play(player, true);
        }
        &self.state
    }

    /// Apply the game's expiry rule for the side on turn.
    pub fn on_turn_timeout(&mut self) {
        if !self.turn.is_playing() {
            return;
        }
        debug!(game = self.engine.name(), active = %self.turn.active, "turn timed out");
        self.state = self.engine.on_timeout(&self.state);
        self.after_transition();
    }

    /// The bot heuristic's pick for `side`. Nothing is submitted.
    ///
    /// `None` when `side` is not on turn, play is suspended, or the side has
    /// no legal move.
    pub fn request_bot_move(&mut self, side: PlayerId) -> Option<E::Move> {
        if !self.turn.is_playing() || self.engine.active_player(&self.state) != side {
            return None;
        }
        let choice = self.engine.choose_bot_move(&self.state, side, &mut self.rng);
        if choice.is_none() {
            debug!(game = self.engine.name(), %side, "bot has no move");
        }
        choice
    }

    /// Advance virtual time, firing the turn clock and due callbacks in order.
    ///
    /// Callbacks queued with zero delay while this runs wait for the next
    /// call, so instant bot-vs-bot play makes one move per call.
    pub fn tick(&mut self, elapsed: Duration) {
        let mark = self.scheduler.mark();
        let mut remaining = elapsed;
        loop {
            let mut step = match self.scheduler.next_due_before(mark) {
                Some(due) if due <= remaining => due,
                _ => remaining,
            };
            let clock_left = self.turn.clock.remaining();
            if self.turn.is_playing()
                && matches!(self.turn.clock.policy(), ClockPolicy::PerTurn(_))
                && !clock_left.is_zero()
            {
                step = step.min(clock_left);
            }
            self.scheduler.advance(step);
            remaining -= step;

            if self.turn.is_playing() && self.turn.clock.advance(step) {
                self.on_turn_timeout();
            }
            while let Some(task) = self.scheduler.pop_due_before(mark) {
                self.run_task(task);
            }

            if remaining.is_zero() {
                break;
            }
        }
    }

    /// The player leaves: the match ends as their loss.
    pub fn exit(&mut self, player: PlayerId) {
        if self.turn.status == GameStatus::GameOver {
            return;
        }
        let winner = (self.engine.player_count() == 2).then(|| player.next(2));
        info!(game = self.engine.name(), %player, "player left the match");
        self.finish_match(winner);
    }

    /// Hand a side over to the bot heuristic, or take it back.
    pub fn set_auto_play(&mut self, player: PlayerId, enabled: bool) {
        let was_bot_driven = self.seats[player].is_bot_driven();
        self.seats[player].auto_play = enabled;
        if enabled && !was_bot_driven && self.turn.is_playing() && self.turn.active == player {
            self.schedule_bot();
        }
    }

    /// Buy auto-play for a seat. The first purchase emits `CoinsSpent`;
    /// later calls only switch it back on.
    pub fn buy_auto_play(&mut self, player: PlayerId) {
        if !self.auto_play_owned[player] {
            self.auto_play_owned[player] = true;
            self.events.push(SessionEvent::CoinsSpent {
                player,
                amount: self.auto_play_price,
            });
        }
        self.set_auto_play(player, true);
    }

    // === Internals ===

    fn begin_round(&mut self) {
        info!(game = self.engine.name(), round = self.turn.round, "round started");
        self.events.push(SessionEvent::RoundStarted {
            round: self.turn.round,
        });
        self.events.push(SessionEvent::TurnChanged {
            active: self.turn.active,
        });
        self.schedule_bot();
    }

    fn restart_round(&mut self) {
        if self.turn.status != GameStatus::RoundOver {
            return;
        }
        let round = self.turn.round + 1;
        self.state = self.engine.deal(&mut self.rng);
        self.turn = TurnState::new(self.engine.active_player(&self.state), self.engine.clock_policy());
        self.turn.round = round;
        self.begin_round();
    }

    /// Bookkeeping after the state changed by a move or a timeout.
    fn after_transition(&mut self) {
        self.scheduler.cancel_all();

        if let Some(result) = self.engine.round_result(&self.state) {
            self.end_round(result);
            return;
        }

        let active = self.engine.active_player(&self.state);
        if active != self.turn.active {
            self.turn.active = active;
            self.events.push(SessionEvent::TurnChanged { active });
        }
        self.turn.clock.reset_for_turn();
        self.schedule_bot();
    }

    fn end_round(&mut self, result: RoundResult) {
        self.turn.status = GameStatus::RoundOver;
        info!(
            game = self.engine.name(),
            round = self.turn.round,
            winner = ?result.winner,
            points = result.points,
            "round over"
        );
        self.events.push(SessionEvent::RoundEnded {
            winner: result.winner,
            points: result.points,
        });

        match self.score.record(self.engine.match_rule(), result) {
            MatchDecision::Continue => {
                self.scheduler
                    .schedule(self.pacing.round_restart_delay(), Task::RestartRound);
            }
            MatchDecision::Won(winner) => self.finish_match(Some(winner)),
            MatchDecision::Drawn => self.finish_match(None),
        }
    }

    fn finish_match(&mut self, winner: Option<PlayerId>) {
        self.scheduler.cancel_all();
        self.turn.status = GameStatus::GameOver;
        let coins_reward = self
            .engine
            .rewards()
            .for_outcome(winner == Some(PlayerId::HUMAN));
        info!(game = self.engine.name(), ?winner, coins_reward, "match over");
        self.events.push(SessionEvent::MatchEnded {
            winner,
            coins_reward,
        });
    }

    /// Queue a bot move if the side on turn is bot-driven.
    fn schedule_bot(&mut self) {
        if !self.turn.is_playing() {
            return;
        }
        let side = self.turn.active;
        let seat = &self.seats[side];
        if !seat.is_bot_driven() {
            return;
        }
        let delay = if seat.auto_play && side == PlayerId::HUMAN {
            self.pacing.auto_play_delay()
        } else {
            self.pacing.bot_delay()
        };
        self.scheduler.schedule(delay, Task::BotMove(side));
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::BotMove(side) => {
                let choice = if self.seats[side].is_bot_driven() {
                    self.request_bot_move(side)
                } else {
                    None
                };
                match choice {
                    Some(mv) => {
                        self.submit_move(side, mv);
                    }
                    None => trace!(%side, "bot task no longer applies"),
                }
            }
            Task::RestartRound => self.restart_round(),
        }
    }
}

fn check_seats<E: TurnBasedEngine>(engine: &E, seats: &PlayerMap<Seat>) -> Result<(), SessionError> {
    if seats.player_count() == engine.player_count() {
        Ok(())
    } else {
        Err(SessionError::SeatCount {
            game: engine.name(),
            expected: engine.player_count(),
            got: seats.player_count(),
        })
    }
}
