//! Core rules of the falling-block game.
//!
//! Pure, deterministic game logic with no I/O: the grid, piece geometry and
//! wall-kick rotation, the uniform piece source, and the session state
//! machine that ties them together. Timing, input, rendering, and real
//! persistence all live in the surrounding crates; the only seam into the
//! outside world is the [`HighScoreStore`] trait.
//!
//! # Module map
//!
//! - [`config`]: the immutable tuning struct (board size, fall periods,
//!   score table).
//! - [`grid`]: the play field — collision queries, draw/undraw, line
//!   clearing with compaction.
//! - [`piece`]: pivot-anchored piece geometry, movement, and SRS-style
//!   wall-kick rotation.
//! - [`rng`]: seedable uniform shape selection.
//! - [`session`]: the state machine — gravity ticks, commands, scoring,
//!   level/speed progression, game over.
//! - [`highscore`]: the persistence seam.
//! - [`snapshot`]: the read-only surface renderers consume.
//!
//! # Example
//!
//! ```
//! use gridfall_core::Session;
//! use gridfall_types::{Command, Phase};
//!
//! let mut session = Session::with_defaults(12345);
//! session.start();
//! assert_eq!(session.phase(), Phase::Running);
//!
//! session.apply(Command::MoveLeft);
//! session.apply(Command::RotateCw);
//! session.apply(Command::HardDrop);
//!
//! // The scheduler would call this at the current fall period.
//! let report = session.on_tick();
//! assert!(report.locked);
//! ```

pub mod config;
pub mod grid;
pub mod highscore;
pub mod piece;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use config::GameConfig;
pub use grid::{Cell, ClearedRows, Grid, SpawnPosition};
pub use highscore::{HighScoreStore, MemoryHighScores};
pub use piece::Piece;
pub use rng::{PieceSource, SimpleRng};
pub use session::{GameOverReport, Session, TickReport};
pub use snapshot::{PieceView, Snapshot};
