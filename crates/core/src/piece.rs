//! Piece geometry, movement, and wall-kick rotation.
//!
//! A piece is its shape kind, a rotation index in `0..4`, and four absolute
//! grid cells, where `cells[0]` is the pivot the other three rotate around.
//! Rotation follows the Super Rotation System expressed as offset pairs: each
//! shape carries a table of per-rotation offsets, and the kick translation
//! between two rotation states is `table[row][old] - table[row][new]`, tried
//! row by row until one yields a collision-free placement.

use gridfall_types::{ShapeKind, Vec2};

use crate::grid::Grid;

/// Pivot-relative offsets of cells 1..=3 at rotation index 0.
fn spawn_offsets(kind: ShapeKind) -> [Vec2; 3] {
    match kind {
        // ▪▪▪▪   pivot second from the left
        ShapeKind::I => [Vec2::new(-1, 0), Vec2::new(2, 0), Vec2::new(1, 0)],
        // ▪
        // ▪▪▪    pivot in the middle of the bottom row
        ShapeKind::J => [Vec2::new(-1, 0), Vec2::new(-1, -1), Vec2::new(1, 0)],
        //   ▪
        // ▪▪▪
        ShapeKind::L => [Vec2::new(1, 0), Vec2::new(1, -1), Vec2::new(-1, 0)],
        // ▪▪
        // ▪▪     pivot bottom-left
        ShapeKind::O => [Vec2::new(1, 0), Vec2::new(1, -1), Vec2::new(0, -1)],
        //  ▪▪
        // ▪▪
        ShapeKind::S => [Vec2::new(-1, 0), Vec2::new(0, -1), Vec2::new(1, -1)],
        //  ▪
        // ▪▪▪
        ShapeKind::T => [Vec2::new(-1, 0), Vec2::new(0, -1), Vec2::new(1, 0)],
        // ▪▪
        //  ▪▪
        ShapeKind::Z => [Vec2::new(0, -1), Vec2::new(-1, -1), Vec2::new(1, 0)],
    }
}

/// SRS offset data, one `[Vec2; 4]` row per kick candidate, indexed by
/// rotation state. Stored with y already negated for the y-down grid.
const OFFSETS_JLSTZ: [[Vec2; 4]; 5] = [
    [Vec2::new(0, 0), Vec2::new(0, 0), Vec2::new(0, 0), Vec2::new(0, 0)],
    [Vec2::new(0, 0), Vec2::new(1, 0), Vec2::new(0, 0), Vec2::new(-1, 0)],
    [Vec2::new(0, 0), Vec2::new(1, 1), Vec2::new(0, 0), Vec2::new(-1, 1)],
    [Vec2::new(0, 0), Vec2::new(0, -2), Vec2::new(0, 0), Vec2::new(0, -2)],
    [Vec2::new(0, 0), Vec2::new(1, -2), Vec2::new(0, 0), Vec2::new(-1, -2)],
];

const OFFSETS_I: [[Vec2; 4]; 5] = [
    [Vec2::new(0, 0), Vec2::new(-1, 0), Vec2::new(-1, -1), Vec2::new(0, -1)],
    [Vec2::new(-1, 0), Vec2::new(0, 0), Vec2::new(1, -1), Vec2::new(0, -1)],
    [Vec2::new(2, 0), Vec2::new(0, 0), Vec2::new(-2, -1), Vec2::new(0, -1)],
    [Vec2::new(-1, 0), Vec2::new(0, -1), Vec2::new(1, 0), Vec2::new(0, 1)],
    [Vec2::new(2, 0), Vec2::new(0, 2), Vec2::new(-2, 0), Vec2::new(0, -2)],
];

/// The O shape needs no real kicks; its single row realigns the square so
/// every rotation lands exactly on the cells it came from.
const OFFSETS_O: [[Vec2; 4]; 1] =
    [[Vec2::new(0, 0), Vec2::new(0, 1), Vec2::new(-1, 1), Vec2::new(-1, 0)]];

fn kick_offsets(kind: ShapeKind) -> &'static [[Vec2; 4]] {
    match kind {
        ShapeKind::I => &OFFSETS_I,
        ShapeKind::O => &OFFSETS_O,
        _ => &OFFSETS_JLSTZ,
    }
}

/// Rotate a pivot-relative offset a quarter turn.
///
/// With y growing downward the usual screen-space matrices swap roles: these
/// mappings are chosen so the *clockwise* command turns the piece clockwise
/// as seen on screen.
fn rotate_offset(rel: Vec2, clockwise: bool) -> Vec2 {
    if clockwise {
        Vec2::new(-rel.y, rel.x)
    } else {
        Vec2::new(rel.y, -rel.x)
    }
}

/// A falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    rotation: u8,
    cells: [Vec2; 4],
}

impl Piece {
    /// Create a piece at rotation 0 with an unset position. Call
    /// [`Piece::set_position`] (or let the grid spawn it) before use.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            rotation: 0,
            cells: [Vec2::ZERO; 4],
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Rotation index, `0..4`.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// The four absolute cells; index 0 is the pivot.
    pub fn cells(&self) -> &[Vec2; 4] {
        &self.cells
    }

    /// Place the pivot and derive the remaining cells from the shape's
    /// rotation-0 geometry.
    pub fn set_position(&mut self, pivot: Vec2) {
        self.cells[0] = pivot;
        for (cell, offset) in self.cells[1..].iter_mut().zip(spawn_offsets(self.kind)) {
            *cell = pivot + offset;
        }
    }

    /// Whether every cell could move by `delta` on the given grid.
    pub fn can_translate(&self, delta: Vec2, grid: &Grid) -> bool {
        self.cells
            .iter()
            .all(|&cell| grid.can_be_moved_to(cell + delta))
    }

    /// Move the piece by `delta` if all four destination cells are free.
    ///
    /// With `update_grid` the piece is undrawn first and redrawn afterward,
    /// so the move cannot collide with its own current cells; without it only
    /// the coordinates change (used internally by the kick pass, where the
    /// piece is already off the grid).
    pub fn translate(&mut self, delta: Vec2, grid: &mut Grid, update_grid: bool) -> bool {
        if update_grid {
            grid.undraw_piece(self);
        }

        let can_move = self.can_translate(delta, grid);
        if can_move {
            for cell in &mut self.cells {
                *cell += delta;
            }
        }

        if update_grid {
            grid.draw_piece(self);
        }

        can_move
    }

    /// Rotate a quarter turn with wall kicks.
    ///
    /// The piece is taken off the grid, rotated about its pivot, and each
    /// kick candidate is tried in table order. If none fits, the saved
    /// pre-rotation geometry is restored, so a failed rotation leaves the
    /// piece exactly where it was. The piece is redrawn in either case.
    pub fn rotate(&mut self, clockwise: bool, grid: &mut Grid) -> bool {
        grid.undraw_piece(self);

        let saved_cells = self.cells;
        let saved_rotation = self.rotation;

        let old = self.rotation as usize;
        self.rotation = if clockwise {
            (self.rotation + 1) % 4
        } else {
            (self.rotation + 3) % 4
        };
        let new = self.rotation as usize;

        let pivot = self.cells[0];
        for cell in &mut self.cells[1..] {
            *cell = pivot + rotate_offset(*cell - pivot, clockwise);
        }

        let rotated = self.apply_kick(old, new, grid);
        if !rotated {
            self.cells = saved_cells;
            self.rotation = saved_rotation;
        }

        grid.draw_piece(self);
        rotated
    }

    /// Try each kick candidate for the `old -> new` transition and commit the
    /// first translation whose cells are all free.
    fn apply_kick(&mut self, old: usize, new: usize, grid: &mut Grid) -> bool {
        for row in kick_offsets(self.kind) {
            let relative = row[old] - row[new];
            if self.translate(relative, grid, false) {
                return true;
            }
        }

        false
    }
}
