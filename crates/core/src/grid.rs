//! The play-field grid.
//!
//! A `rows x cols` matrix of cells stored as a flat row-major `Vec`. Each cell
//! is either empty or holds the kind of the shape that occupies it. The top
//! two rows are the spawn buffer: they take part in collision checks like any
//! other rows but are skipped by the renderer, so freshly spawned pieces
//! appear to slide in from above the visible field.
//!
//! The grid is mutated only through `draw_piece` / `undraw_piece` /
//! `remove_full_lines` / `reset`; everything else is a read-only query.

use arrayvec::ArrayVec;

use gridfall_types::{ShapeKind, Vec2};

use crate::config::{DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
use crate::piece::Piece;

/// A single grid cell: empty, or occupied by a locked (or active) shape.
pub type Cell = Option<ShapeKind>;

/// Cleared-row indices from one compaction pass, bottom-up. Capacity covers
/// the largest permitted grid so the list never spills.
pub type ClearedRows = ArrayVec<i32, { MAX_ROWS as usize }>;

/// Where a piece's pivot is placed when it is spawned onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPosition {
    /// Horizontally centered, pivot in the second row (the spawn buffer).
    CenterTop,
    /// Horizontally and vertically centered; used for preview boards.
    CenterMid,
}

/// The play field.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Dimensions outside `[4, 50]` rows / `[4, 25]` columns fall back to the
    /// 22x10 defaults rather than failing construction.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows_valid = (MIN_ROWS..=MAX_ROWS).contains(&rows);
        let cols_valid = (MIN_COLS..=MAX_COLS).contains(&cols);

        let rows = if rows_valid { rows } else { DEFAULT_ROWS };
        let cols = if cols_valid { cols } else { DEFAULT_COLS };

        Self {
            rows,
            cols,
            cells: vec![None; (rows * cols) as usize],
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    fn index(&self, pos: Vec2) -> usize {
        (pos.y * self.cols + pos.x) as usize
    }

    /// Cell at `pos`, or `None` when `pos` is off the board.
    pub fn cell(&self, pos: Vec2) -> Option<Cell> {
        self.is_on_board(pos).then(|| self.cells[self.index(pos)])
    }

    /// All cells in row-major order, for the render surface.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `pos` lies within the addressable coordinate space.
    pub fn is_on_board(&self, pos: Vec2) -> bool {
        (0..self.cols).contains(&pos.x) && (0..self.rows).contains(&pos.y)
    }

    /// Whether the on-board cell at `pos` is empty. Off-board positions are
    /// not empty (they cannot be moved to).
    pub fn is_empty_at(&self, pos: Vec2) -> bool {
        self.is_on_board(pos) && self.cells[self.index(pos)].is_none()
    }

    /// The collision query: a piece cell may occupy `pos` iff it is on the
    /// board and currently empty.
    pub fn can_be_moved_to(&self, pos: Vec2) -> bool {
        self.is_on_board(pos) && self.is_empty_at(pos)
    }

    /// Occupy the piece's four cells with its color.
    ///
    /// Validation happens before any mutation: if a single target cell is
    /// off-board or occupied, the grid is left untouched and `false` is
    /// returned.
    pub fn draw_piece(&mut self, piece: &Piece) -> bool {
        if !piece.cells().iter().all(|&pos| self.can_be_moved_to(pos)) {
            return false;
        }

        let kind = piece.kind();
        for &pos in piece.cells() {
            let idx = self.index(pos);
            self.cells[idx] = Some(kind);
        }

        true
    }

    /// Position the piece at a spawn pivot, then draw it.
    pub fn spawn_piece(&mut self, piece: &mut Piece, at: SpawnPosition) -> bool {
        let pivot = match at {
            // Centered in the columns (rounding left), pivot in the second
            // row so the piece body sits inside the hidden buffer.
            SpawnPosition::CenterTop => Vec2::new((self.cols - 1) / 2, 1),
            SpawnPosition::CenterMid => Vec2::new((self.cols - 1) / 2, self.rows / 2),
        };

        piece.set_position(pivot);
        self.draw_piece(piece)
    }

    /// Clear the piece's cells. Off-board cells are skipped; never fails.
    pub fn undraw_piece(&mut self, piece: &Piece) {
        for &pos in piece.cells() {
            if self.is_on_board(pos) {
                let idx = self.index(pos);
                self.cells[idx] = None;
            }
        }
    }

    /// Whether the whole grid is empty.
    ///
    /// Checking the bottom row suffices: gravity compaction never leaves an
    /// occupied row with only empty rows below it.
    pub fn is_empty(&self) -> bool {
        let bottom = self.rows - 1;
        (0..self.cols).all(|x| self.is_empty_at(Vec2::new(x, bottom)))
    }

    /// Clear every full row and compact the rows above, bottom-to-top.
    ///
    /// Returns the cleared row indices (bottom-up); the count of cleared
    /// lines is the length of the returned list. Scanning stops at the first
    /// entirely empty row, since everything above it must be empty too.
    pub fn remove_full_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();

        for row in (0..self.rows).rev() {
            let mut is_full = true;
            let mut is_row_empty = true;

            for col in 0..self.cols {
                if !is_full && !is_row_empty {
                    break;
                }
                if self.is_empty_at(Vec2::new(col, row)) {
                    is_full = false;
                } else {
                    is_row_empty = false;
                }
            }

            if is_full {
                cleared.push(row);
                for col in 0..self.cols {
                    let idx = self.index(Vec2::new(col, row));
                    self.cells[idx] = None;
                }
            } else if is_row_empty {
                break;
            } else if !cleared.is_empty() {
                // Semi-filled row above at least one cleared row: shift its
                // occupied cells down by the number of rows cleared so far.
                let shift = cleared.len() as i32;
                for col in 0..self.cols {
                    let src = self.index(Vec2::new(col, row));
                    if let Some(kind) = self.cells[src] {
                        let dst = self.index(Vec2::new(col, row + shift));
                        self.cells[dst] = Some(kind);
                        self.cells[src] = None;
                    }
                }
            }
        }

        cleared
    }

    /// Empty every cell.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Directly set a cell, for building board positions in tests and tools.
    /// Off-board positions are ignored.
    pub fn set_cell(&mut self, pos: Vec2, cell: Cell) {
        if self.is_on_board(pos) {
            let idx = self.index(pos);
            self.cells[idx] = cell;
        }
    }
}
