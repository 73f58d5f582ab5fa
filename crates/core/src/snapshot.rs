//! Read-only render surface.
//!
//! Renderers never touch the session directly; they receive a [`Snapshot`]
//! copied out under the engine lock. The buffer is reusable: fill it with
//! `Session::snapshot_into` every frame instead of allocating a fresh one.

use gridfall_types::{Phase, ShapeKind, Vec2};

use crate::grid::Cell;

/// The active piece as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceView {
    pub kind: ShapeKind,
    pub cells: [Vec2; 4],
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub rows: i32,
    pub cols: i32,
    /// Row-major grid cells, including the active piece's drawn cells.
    pub cells: Vec<Cell>,
    pub active: Option<PieceView>,
    pub next: Option<ShapeKind>,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub high_score: u32,
    /// Spawn counts per shape, indexed by `ShapeKind::index()`.
    pub tallies: [u32; 7],
    /// The fall period the scheduler should currently be running at.
    pub fall_period: u32,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
            active: None,
            next: None,
            phase: Phase::Idle,
            score: 0,
            level: 1,
            lines: 0,
            high_score: 0,
            tallies: [0; 7],
            fall_period: 0,
        }
    }
}
