//! The game session: progression, scoring, and the piece lifecycle.
//!
//! A session owns the grid, the active and next pieces, the score/level
//! counters, and the fall-period state. It is driven from outside by two
//! entry points: [`Session::on_tick`], called by the scheduler at the current
//! fall period, and [`Session::apply`], called by the input dispatcher with
//! discrete player commands. Both operate under whatever lock the host wraps
//! the session in; the session itself is single-threaded.
//!
//! # Speed curve
//!
//! The fall period starts at the configured maximum and steps down one
//! interval per level until it reaches the minimum — one "period-cycle".
//! Completing a level at the minimum period starts the next cycle one
//! interval *above* where the previous cycle started its final descent, so
//! the game briefly relents before speeding up again. Once every cycle has
//! elapsed the period stays pinned at the minimum. The curve is intentionally
//! non-monotonic across cycle boundaries.

use gridfall_types::{Command, Phase, ShapeKind, Vec2};

use crate::config::GameConfig;
use crate::grid::{Grid, SpawnPosition};
use crate::highscore::{HighScoreStore, MemoryHighScores};
use crate::piece::Piece;
use crate::rng::PieceSource;
use crate::snapshot::{PieceView, Snapshot};

/// What happened during one scheduler tick.
///
/// `fall_period` always carries the period the scheduler should use for the
/// next wait, so the tick driver can adjust without re-querying the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// The active piece moved down one row; nothing else happened.
    pub moved_down: bool,
    /// The active piece locked into the grid this tick.
    pub locked: bool,
    /// Full rows cleared by the lock (0..=4 in normal play).
    pub lines_cleared: u32,
    /// The clear left the grid completely empty.
    pub perfect_clear: bool,
    /// Score gained from this tick's line clears.
    pub score_gained: u32,
    /// The level rose this tick.
    pub leveled_up: bool,
    /// Set when the spawn after a lock collided: the session is over.
    pub game_over: Option<GameOverReport>,
    /// Fall period for the scheduler's next wait, in milliseconds.
    pub fall_period: u32,
}

impl TickReport {
    fn quiet(fall_period: u32) -> Self {
        Self {
            fall_period,
            ..Self::default()
        }
    }
}

/// Final stats reported when the session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverReport {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// The final score beat the stored high score.
    pub new_high_score: bool,
    /// The new high score was persisted. Always `false` when
    /// `new_high_score` is `false`; a failed best-effort write leaves it
    /// `false` too.
    pub high_score_saved: bool,
}

/// A full game of falling blocks.
pub struct Session {
    config: GameConfig,
    grid: Grid,
    source: PieceSource,
    active: Option<Piece>,
    next: Option<Piece>,
    phase: Phase,
    score: u32,
    level: u32,
    lines: u32,
    tallies: [u32; 7],
    high_score: u32,
    fall_period_normal: u32,
    fall_period_current: u32,
    period_coefficient: u32,
    period_cycles_elapsed: u32,
    soft_drop: bool,
    store: Box<dyn HighScoreStore + Send>,
}

impl Session {
    /// Create an idle session. Call [`Session::start`] (or apply
    /// [`Command::Restart`]) to begin play.
    pub fn new(config: GameConfig, seed: u32, store: Box<dyn HighScoreStore + Send>) -> Self {
        let config = config.normalized();
        let high_score = store.load();

        Self {
            grid: Grid::new(config.rows, config.cols),
            source: PieceSource::new(seed),
            active: None,
            next: None,
            phase: Phase::Idle,
            score: 0,
            level: 1,
            lines: 0,
            tallies: [0; 7],
            high_score,
            fall_period_normal: config.fall_period_max,
            fall_period_current: config.fall_period_max,
            period_coefficient: 0,
            period_cycles_elapsed: 0,
            soft_drop: false,
            store,
            config,
        }
    }

    /// Convenience constructor with default tuning and an in-memory store.
    pub fn with_defaults(seed: u32) -> Self {
        Self::new(
            GameConfig::default(),
            seed,
            Box::new(MemoryHighScores::default()),
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tallies(&self) -> &[u32; 7] {
        &self.tallies
    }

    /// The period the scheduler should currently wait between ticks.
    pub fn fall_period(&self) -> u32 {
        self.fall_period_current
    }

    /// The non-soft-drop period for the current level.
    pub fn normal_fall_period(&self) -> u32 {
        self.fall_period_normal
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, for building board positions in tests and tools.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_kind(&self) -> Option<ShapeKind> {
        self.next.as_ref().map(Piece::kind)
    }

    /// Reset everything and begin play: empty grid, score 0, level 1, fall
    /// period back at its maximum, fresh active and next pieces.
    pub fn start(&mut self) {
        self.grid.reset();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.tallies = [0; 7];
        self.soft_drop = false;
        self.fall_period_normal = self.config.fall_period_max;
        self.fall_period_current = self.config.fall_period_max;
        self.period_coefficient = 0;
        self.period_cycles_elapsed = 0;
        self.active = None;
        self.next = None;
        self.phase = Phase::Running;

        if !self.spawn_next() {
            // Unreachable on any legal grid, but a failed first spawn must
            // still land in the terminal state.
            self.finish_game();
        }
    }

    /// One gravity step, invoked by the scheduler at the current fall period.
    ///
    /// If the piece cannot move down it locks: full rows are cleared and
    /// scored, the level and fall period advance, and the next piece spawns.
    /// A blocked spawn ends the session.
    pub fn on_tick(&mut self) -> TickReport {
        let mut report = TickReport::quiet(self.fall_period_current);
        if self.phase != Phase::Running {
            return report;
        }

        if self.move_active(Vec2::DOWN) {
            report.moved_down = true;
            return report;
        }

        // Time is up for this piece: its cells stay behind as terrain.
        self.active = None;
        report.locked = true;

        let cleared = self.grid.remove_full_lines();
        let count = cleared.len() as u32;
        if count > 0 {
            let table = &self.config.line_scores;
            let mut gained = table[(count as usize - 1).min(table.len() - 1)] * self.level;

            report.perfect_clear = self.grid.is_empty();
            if report.perfect_clear {
                gained *= 2;
            }

            self.score += gained;
            self.lines += count;
            report.lines_cleared = count;
            report.score_gained = gained;

            if self.lines > self.config.level_length * self.level {
                self.level += 1;
                self.advance_fall_period();
                report.leveled_up = true;
            }
        }

        // Whatever the soft-drop toggle did, the new piece falls at the
        // normal rate until the player drops again.
        self.fall_period_current = self.fall_period_normal;

        if !self.spawn_next() {
            report.game_over = Some(self.finish_game());
        }

        report.fall_period = self.fall_period_current;
        report
    }

    /// Handle a player command. Returns whether the command had any effect;
    /// an illegal move or rotation is an ordinary `false`, not an error.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Pause => self.toggle_pause(),
            Command::Restart => {
                self.start();
                true
            }
            _ if self.phase != Phase::Running => false,
            Command::MoveLeft => self.move_active(Vec2::LEFT),
            Command::MoveRight => self.move_active(Vec2::RIGHT),
            Command::SoftDrop => self.toggle_soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.rotate_active(true),
            Command::RotateCcw => self.rotate_active(false),
        }
    }

    fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            _ => false,
        }
    }

    fn toggle_soft_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }

        self.soft_drop = !self.soft_drop;
        self.fall_period_current = if self.soft_drop {
            self.config.soft_drop_period
        } else {
            self.fall_period_normal
        };
        true
    }

    /// Drop the active piece straight down to its resting row. Locking
    /// happens on the next tick, not inside the command.
    fn hard_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }

        while self.move_active(Vec2::DOWN) {}
        true
    }

    fn move_active(&mut self, delta: Vec2) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.translate(delta, &mut self.grid, true),
            None => false,
        }
    }

    fn rotate_active(&mut self, clockwise: bool) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.rotate(clockwise, &mut self.grid),
            None => false,
        }
    }

    /// Promote the pending piece (or draw a fresh one), tally it, pre-draw
    /// its successor, and place it at the top of the grid.
    fn spawn_next(&mut self) -> bool {
        let mut piece = match self.next.take() {
            Some(piece) => piece,
            None => Piece::new(self.source.draw()),
        };

        self.tallies[piece.kind().index()] += 1;
        self.next = Some(Piece::new(self.source.draw()));

        if self.grid.spawn_piece(&mut piece, SpawnPosition::CenterTop) {
            self.active = Some(piece);
            true
        } else {
            self.active = None;
            false
        }
    }

    /// Enter the terminal state and persist the high score if it was beaten.
    /// A failed write is reported, never propagated.
    fn finish_game(&mut self) -> GameOverReport {
        self.phase = Phase::GameOver;

        let new_high_score = self.score > self.high_score;
        let mut high_score_saved = false;
        if new_high_score {
            self.high_score = self.score;
            high_score_saved = self.store.save(self.high_score);
        }

        GameOverReport {
            score: self.score,
            level: self.level,
            lines: self.lines,
            new_high_score,
            high_score_saved,
        }
    }

    /// Advance the normal fall period after a level-up; see the module docs
    /// for the cycle behavior.
    fn advance_fall_period(&mut self) {
        if self.period_cycles_elapsed + 1 == self.config.period_cycle_count() {
            return;
        }

        if self.fall_period_normal == self.config.fall_period_min {
            self.period_cycles_elapsed += 1;
            self.period_coefficient = self.period_cycles_elapsed;
        } else {
            self.period_coefficient += 1;
        }

        self.fall_period_normal =
            self.config.fall_period_max - self.config.fall_period_interval * self.period_coefficient;
    }

    /// Fill a reusable snapshot buffer with the current render surface.
    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.as_ref().map(|piece| PieceView {
            kind: piece.kind(),
            cells: *piece.cells(),
        });
        out.next = self.next_kind();
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.high_score = self.high_score;
        out.tallies = self.tallies;
        out.fall_period = self.fall_period_current;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut out = Snapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("lines", &self.lines)
            .field("fall_period", &self.fall_period_current)
            .finish_non_exhaustive()
    }
}
