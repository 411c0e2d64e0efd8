//! Game state module - one game session
//!
//! This module ties together the board, the piece catalog, the piece source
//! and scoring. It owns the session state machine:
//!
//! ```text
//! NoPiece --spawn--> Falling --tick/hard drop, blocked--> Locking
//!    ^                  |                                   |
//!    |                  +--------- spawn blocked ---------> GameOver
//!    +------------- lock, clear, score <--------------------+
//! ```
//!
//! `Locking` never survives a step: the lock, line clear and the next spawn
//! all happen synchronously.

use crate::board::Board;
use crate::config::BoardConfig;
use crate::pieces::{base_shape, spawn_x, Shape};
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::{drop_score, level_for_lines, line_clear_score, tick_interval_ms};
use crate::types::{
    GameCommand, ParticleBurst, Phase, PieceColor, PieceKind, BASE_TICK_MS, HARD_DROP_BURST,
    LINE_CLEAR_BURST,
};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current rotation; replaced wholesale on a successful rotate.
    pub shape: Shape,
    pub color: PieceColor,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Create a new piece at the spawn position for a board of `board_width`
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = base_shape(kind);
        Self {
            kind,
            shape,
            color: kind.color(),
            x: spawn_x(board_width, &shape),
            y: 0,
        }
    }

    /// Absolute board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if the piece fits on the board where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_placement(&self.shape, self.x, self.y)
    }
}

/// Result of locking a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points from cleared lines only.
    pub line_clear_score: u32,
    /// Points from the hard drop that led to this lock, if any.
    pub drop_score: u32,
    /// Level in force when the lines were scored.
    pub level: u32,
}

/// What a single step (tick or command) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The step changed the session.
    pub accepted: bool,
    /// Kind of the piece spawned during this step.
    pub spawned: Option<PieceKind>,
    pub lock: Option<LockEvent>,
    /// New gravity interval (ms) after a level change.
    pub interval_changed: Option<u32>,
    /// The session entered `GameOver` during this step.
    pub game_over: bool,
    pub restarted: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformSource> {
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    source: S,
    phase: Phase,
    score: u32,
    lines: u32,
    level: u32,
    tick_interval_ms: u32,
    /// Cosmetic events since the last `take_particle_bursts`.
    bursts: Vec<ParticleBurst>,
    /// Monotonic id for spawned pieces (increments on every spawn).
    piece_id: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
}

impl<S: PieceSource> GameState<S> {
    /// Create a new session on an empty board; the first next piece is drawn
    /// immediately. Call [`GameState::start`] to spawn it.
    pub fn new(config: BoardConfig, source: S) -> Self {
        Self::with_board(Board::new(config), source)
    }

    /// Create a session on a pre-filled board.
    pub fn with_board(board: Board, mut source: S) -> Self {
        let next = source.next_kind();
        Self {
            board,
            active: None,
            next,
            source,
            phase: Phase::NoPiece,
            score: 0,
            lines: 0,
            level: 1,
            tick_interval_ms: BASE_TICK_MS,
            bursts: Vec::new(),
            piece_id: 0,
            episode_id: 0,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.phase != Phase::NoPiece {
            return outcome;
        }
        outcome.accepted = true;
        self.spawn(&mut outcome);
        outcome
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::NoPiece
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current gravity interval in milliseconds
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// The piece that will spawn next.
    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Bursts emitted since the last call to [`GameState::take_particle_bursts`].
    pub fn particle_bursts(&self) -> &[ParticleBurst] {
        &self.bursts
    }

    /// Take and clear pending particle bursts.
    pub fn take_particle_bursts(&mut self) -> Vec<ParticleBurst> {
        std::mem::take(&mut self.bursts)
    }

    /// Pop the next piece into play and draw a new next piece.
    fn spawn(&mut self, outcome: &mut StepOutcome) {
        let kind = self.next;
        self.next = self.source.next_kind();

        let piece = ActivePiece::spawn(kind, self.board.width());
        let fits = piece.is_valid(&self.board);

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        outcome.spawned = Some(kind);

        if fits {
            self.phase = Phase::Falling;
        } else {
            // The blocked piece stays visible; the board is left untouched.
            self.phase = Phase::GameOver;
            outcome.game_over = true;
        }
    }

    /// Check if the active piece could move by (dx, dy)
    pub fn can_move(&self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.board
            .is_valid_placement(&active.shape, active.x + dx, active.y + dy)
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if !self.can_move(dx, dy) {
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            active.x += dx;
            active.y += dy;
        }
        true
    }

    /// Rotate clockwise in place; the old shape is kept if the new one does not fit.
    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let rotated = active.shape.rotated_cw();
        if !self.board.is_valid_placement(&rotated, active.x, active.y) {
            return false;
        }

        active.shape = rotated;
        true
    }

    /// Hard drop the active piece to its resting row and lock it
    fn hard_drop(&mut self) -> StepOutcome {
        let mut distance: u32 = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }

        let points = drop_score(distance, true);
        self.score = self.score.saturating_add(points);

        if let Some(active) = self.active {
            self.bursts
                .extend(active.cells().map(|(x, y)| ParticleBurst {
                    x,
                    y,
                    color: active.color,
                    count: HARD_DROP_BURST,
                }));
        }

        self.begin_lock(points)
    }

    /// Lock sequence: `Falling -> Locking -> NoPiece -> Falling | GameOver`.
    fn begin_lock(&mut self, drop_points: u32) -> StepOutcome {
        let mut outcome = StepOutcome {
            accepted: true,
            ..StepOutcome::default()
        };

        self.phase = Phase::Locking;
        let Some(lock) = self.lock_active(drop_points) else {
            self.phase = Phase::NoPiece;
            return outcome;
        };
        outcome.lock = Some(lock);

        let new_level = level_for_lines(self.lines);
        if new_level != self.level {
            self.level = new_level;
            self.tick_interval_ms = tick_interval_ms(new_level);
            outcome.interval_changed = Some(self.tick_interval_ms);
        }

        self.phase = Phase::NoPiece;
        self.spawn(&mut outcome);
        outcome
    }

    /// Merge the active piece into the board, clear full rows and score them.
    ///
    /// Only valid in `Locking`; any other phase is ignored.
    fn lock_active(&mut self, drop_points: u32) -> Option<LockEvent> {
        if self.phase != Phase::Locking {
            return None;
        }
        let active = self.active.take()?;

        self.board
            .lock(&active.shape, active.color, active.x, active.y);

        let bursts = &mut self.bursts;
        let cleared = self.board.clear_full_rows(|y, cells| {
            for (x, cell) in cells.iter().enumerate() {
                if let Some(color) = cell {
                    bursts.push(ParticleBurst {
                        x: x as i32,
                        y: y as i32,
                        color: *color,
                        count: LINE_CLEAR_BURST,
                    });
                }
            }
        });

        let lines_cleared = cleared.len() as u32;
        let points = line_clear_score(lines_cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared);

        Some(LockEvent {
            lines_cleared,
            line_clear_score: points,
            drop_score: drop_points,
            level: self.level,
        })
    }

    /// One gravity step: fall one row, or lock when blocked.
    ///
    /// Ignored unless a piece is falling.
    pub fn tick(&mut self) -> StepOutcome {
        if self.phase != Phase::Falling {
            return StepOutcome::default();
        }

        if self.try_move(0, 1) {
            return StepOutcome {
                accepted: true,
                ..StepOutcome::default()
            };
        }

        self.begin_lock(0)
    }

    /// Apply a player command
    ///
    /// Movement commands need a falling piece; `Restart` needs `GameOver`.
    /// Anything else is ignored and reported as not accepted.
    pub fn apply_command(&mut self, command: GameCommand) -> StepOutcome {
        if command == GameCommand::Restart {
            return self.restart();
        }
        if self.phase != Phase::Falling {
            return StepOutcome::default();
        }

        let accepted = match command {
            GameCommand::MoveLeft => self.try_move(-1, 0),
            GameCommand::MoveRight => self.try_move(1, 0),
            GameCommand::SoftDrop => {
                let moved = self.try_move(0, 1);
                if moved {
                    self.score = self.score.saturating_add(drop_score(1, false));
                }
                moved
            }
            GameCommand::Rotate => self.try_rotate(),
            GameCommand::HardDrop => return self.hard_drop(),
            GameCommand::Restart => false,
        };

        StepOutcome {
            accepted,
            ..StepOutcome::default()
        }
    }

    /// Reset to a fresh session and spawn; only honored after game over.
    fn restart(&mut self) -> StepOutcome {
        if self.phase != Phase::GameOver {
            return StepOutcome::default();
        }

        self.board = Board::new(self.board.config());
        self.active = None;
        self.next = self.source.next_kind();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.tick_interval_ms = BASE_TICK_MS;
        self.bursts.clear();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = Phase::NoPiece;

        let mut outcome = StepOutcome {
            accepted: true,
            restarted: true,
            ..StepOutcome::default()
        };
        self.spawn(&mut outcome);
        outcome
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::{ActiveSnapshot, NextSnapshot};

        out.width = self.board.width();
        out.height = self.board.height();
        out.board.resize(self.board.height(), Vec::new());
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.clear();
            dst.extend_from_slice(src);
        }

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = NextSnapshot::of(self.next);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.tick_interval_ms = self.tick_interval_ms;
        out.phase = self.phase;
        out.game_over = self.game_over();
        out.piece_id = self.piece_id;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
