//! Game loop controller - one session plus its gravity timer.
//!
//! Every state change goes through this type, one step at a time: a timer
//! firing becomes one `tick`, an input becomes one command. After each step
//! the timer is brought in line with the session:
//!
//! - level change: cancel, then re-arm at the new interval from `now`
//! - game over: cancel
//! - restart: re-arm at the reset interval

use std::ops::Add;
use std::time::Duration;

use tokio::time::Instant;
use tui_blockfall_core::rng::{PieceSource, UniformSource};
use tui_blockfall_core::{GameSnapshot, GameState, StepOutcome};

use crate::event_log::{EventLog, LogEvent};
use crate::scheduler::TickTimer;
use crate::types::{GameCommand, ParticleBurst};

pub struct GameLoop<S = UniformSource, I = Instant> {
    state: GameState<S>,
    timer: TickTimer<I>,
    log: EventLog,
}

impl<S, I> GameLoop<S, I>
where
    S: PieceSource,
    I: Copy + Ord + Add<Duration, Output = I>,
{
    /// Wrap a session that has not been started yet.
    pub fn new(state: GameState<S>) -> Self {
        Self {
            state,
            timer: TickTimer::new(),
            log: EventLog::disabled(),
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn state(&self) -> &GameState<S> {
        &self.state
    }

    pub fn timer(&self) -> &TickTimer<I> {
        &self.timer
    }

    pub fn started(&self) -> bool {
        self.state.started()
    }

    pub fn next_deadline(&self) -> Option<I> {
        self.timer.next_deadline()
    }

    /// Spawn the first piece and arm gravity.
    pub fn start(&mut self, now: I) -> StepOutcome {
        let outcome = self.state.start();
        if outcome.accepted {
            self.log.record(LogEvent::Started);
            self.arm(now);
        }
        self.after_step(&outcome, now);
        outcome
    }

    /// Timer callback: at most one gravity step per call.
    ///
    /// Returns `None` when nothing was due.
    pub fn on_timer(&mut self, now: I) -> Option<StepOutcome> {
        self.timer.fire_if_due(now)?;
        let outcome = self.state.tick();
        self.after_step(&outcome, now);
        Some(outcome)
    }

    pub fn on_command(&mut self, command: GameCommand, now: I) -> StepOutcome {
        let outcome = self.state.apply_command(command);
        self.after_step(&outcome, now);
        outcome
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn take_particle_bursts(&mut self) -> Vec<ParticleBurst> {
        self.state.take_particle_bursts()
    }

    fn arm(&mut self, now: I) {
        let interval = Duration::from_millis(u64::from(self.state.tick_interval_ms()));
        self.timer.arm(now, interval);
    }

    fn after_step(&mut self, outcome: &StepOutcome, now: I) {
        if outcome.restarted {
            self.log.record(LogEvent::Restarted);
            self.arm(now);
        }

        if let Some(lock) = outcome.lock {
            self.log.record(LogEvent::Locked {
                lines_cleared: lock.lines_cleared,
                score: self.state.score(),
            });
        }

        if let Some(interval_ms) = outcome.interval_changed {
            self.log.record(LogEvent::LevelUp {
                level: self.state.level(),
                interval_ms,
            });
            self.timer.cancel();
            self.arm(now);
        }

        if let Some(kind) = outcome.spawned {
            self.log.record(LogEvent::Spawned { kind });
        }

        if outcome.game_over {
            self.log.record(LogEvent::GameOver {
                score: self.state.score(),
                lines: self.state.lines(),
                level: self.state.level(),
            });
            self.timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_blockfall_core::{BoardConfig, SequenceSource};

    use crate::types::{PieceColor, PieceKind};

    type TestLoop = GameLoop<SequenceSource, std::time::Instant>;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn new_loop(kind: PieceKind) -> TestLoop {
        GameLoop::new(GameState::new(
            BoardConfig::default(),
            SequenceSource::repeat(kind),
        ))
    }

    #[test]
    fn test_start_arms_at_base_interval() {
        let t0 = std::time::Instant::now();
        let mut game = new_loop(PieceKind::T);

        let outcome = game.start(t0);
        assert!(outcome.accepted);
        assert_eq!(game.next_deadline(), Some(t0 + ms(1000)));
    }

    #[test]
    fn test_each_firing_is_one_tick() {
        let t0 = std::time::Instant::now();
        let mut game = new_loop(PieceKind::T);
        game.start(t0);

        assert!(game.on_timer(t0 + ms(500)).is_none());
        assert_eq!(game.state().active().unwrap().y, 0);

        // Very late: one row, and the missed ticks are not replayed.
        assert!(game.on_timer(t0 + ms(3000)).is_some());
        assert!(game.on_timer(t0 + ms(3000)).is_none());
        assert_eq!(game.state().active().unwrap().y, 1);
        assert_eq!(game.next_deadline(), Some(t0 + ms(4000)));
    }

    #[test]
    fn test_game_over_disarms_timer() {
        let t0 = std::time::Instant::now();
        let mut board = tui_blockfall_core::Board::default();
        board.set(4, 0, Some(PieceColor::Red));
        let state = GameState::with_board(board, SequenceSource::repeat(PieceKind::O));
        let mut game: TestLoop = GameLoop::new(state);

        let outcome = game.start(t0);
        assert!(outcome.game_over);
        assert!(!game.timer().is_armed());
        assert!(game.on_timer(t0 + ms(5000)).is_none());
    }

    #[test]
    fn test_restart_rearms_from_restart_instant() {
        let t0 = std::time::Instant::now();
        let mut board = tui_blockfall_core::Board::default();
        board.set(4, 0, Some(PieceColor::Red));
        let state = GameState::with_board(board, SequenceSource::repeat(PieceKind::O));
        let mut game: TestLoop = GameLoop::new(state);
        game.start(t0);

        let outcome = game.on_command(GameCommand::Restart, t0 + ms(250));
        assert!(outcome.restarted);
        assert_eq!(game.next_deadline(), Some(t0 + ms(1250)));
        assert_eq!(game.timer().interval(), ms(1000));
    }

    #[test]
    fn test_logs_lifecycle_events() {
        let t0 = std::time::Instant::now();
        let (log, mut rx) = EventLog::channel();
        let mut game = new_loop(PieceKind::O).with_log(log);

        game.start(t0);
        game.on_command(GameCommand::HardDrop, t0);

        let events: Vec<LogEvent> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|r| r.event)
            .collect();
        assert_eq!(
            events,
            vec![
                LogEvent::Started,
                LogEvent::Spawned { kind: PieceKind::O },
                LogEvent::Locked {
                    lines_cleared: 0,
                    score: 36
                },
                LogEvent::Spawned { kind: PieceKind::O },
            ]
        );
    }
}
