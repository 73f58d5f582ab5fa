//! Composes a game snapshot into a character frame.
//!
//! The layout mirrors the classic three-panel arrangement: spawn tallies on
//! the left, the board in the middle, score/next-piece information on the
//! right. The top two grid rows are the spawn buffer and are not drawn, so
//! pieces appear to enter from above the visible field.

use gridfall_core::{Piece, Snapshot};
use gridfall_types::{Phase, Rgb, ShapeKind, Vec2};

/// Rows hidden at the top of the grid.
const HIDDEN_ROWS: i32 = 2;

/// Screen columns per board cell.
const CELL_WIDTH: usize = 2;

const TALLY_WIDTH: usize = 8;
const PANEL_WIDTH: usize = 18;

/// One screen cell: a character and an optional foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Option<Rgb>,
}

impl Default for Glyph {
    fn default() -> Self {
        Self { ch: ' ', fg: None }
    }
}

/// A fixed-size character frame, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Glyph {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x]
        } else {
            Glyph::default()
        }
    }

    fn clear(&mut self) {
        self.glyphs.fill(Glyph::default());
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs.resize(width * height, Glyph::default());
    }

    fn put(&mut self, x: usize, y: usize, ch: char, fg: Option<Rgb>) {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x] = Glyph { ch, fg };
        }
    }

    fn put_str(&mut self, x: usize, y: usize, text: &str, fg: Option<Rgb>) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i, y, ch, fg);
        }
    }
}

/// Stateless snapshot-to-frame renderer.
#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    /// Required frame size for a snapshot's board.
    pub fn frame_size(&self, snapshot: &Snapshot) -> (usize, usize) {
        let visible_rows = (snapshot.rows - HIDDEN_ROWS).max(1) as usize;
        let board_width = snapshot.cols as usize * CELL_WIDTH + 2;
        let width = TALLY_WIDTH + board_width + 2 + PANEL_WIDTH;
        let height = (visible_rows + 2).max(16);
        (width, height)
    }

    /// Draw the snapshot into the frame, resizing it if needed.
    pub fn render(&self, snapshot: &Snapshot, frame: &mut Frame) {
        let (width, height) = self.frame_size(snapshot);
        if frame.width() != width || frame.height() != height {
            frame.resize(width, height);
        }
        frame.clear();

        self.draw_tallies(snapshot, frame);
        self.draw_board(snapshot, frame);
        self.draw_panel(snapshot, frame);
    }

    fn draw_tallies(&self, snapshot: &Snapshot, frame: &mut Frame) {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            let y = 1 + i * 2;
            let label = format!("{} x{}", kind.as_str(), snapshot.tallies[kind.index()]);
            frame.put_str(1, y, &label, Some(kind.color()));
        }
    }

    fn draw_board(&self, snapshot: &Snapshot, frame: &mut Frame) {
        let left = TALLY_WIDTH;
        let interior = snapshot.cols as usize * CELL_WIDTH;
        let visible_rows = (snapshot.rows - HIDDEN_ROWS).max(1);

        frame.put(left, 0, '┌', None);
        frame.put(left + interior + 1, 0, '┐', None);
        frame.put(left, visible_rows as usize + 1, '└', None);
        frame.put(left + interior + 1, visible_rows as usize + 1, '┘', None);
        for x in 1..=interior {
            frame.put(left + x, 0, '─', None);
            frame.put(left + x, visible_rows as usize + 1, '─', None);
        }
        for y in 1..=visible_rows as usize {
            frame.put(left, y, '│', None);
            frame.put(left + interior + 1, y, '│', None);
        }

        for row in HIDDEN_ROWS..snapshot.rows {
            for col in 0..snapshot.cols {
                let cell = snapshot.cells[(row * snapshot.cols + col) as usize];
                let sx = left + 1 + col as usize * CELL_WIDTH;
                let sy = (row - HIDDEN_ROWS) as usize + 1;
                match cell {
                    Some(kind) => {
                        let color = Some(kind.color());
                        frame.put(sx, sy, '█', color);
                        frame.put(sx + 1, sy, '█', color);
                    }
                    None => {
                        frame.put(sx, sy, ' ', None);
                        frame.put(sx + 1, sy, ' ', None);
                    }
                }
            }
        }
    }

    fn draw_panel(&self, snapshot: &Snapshot, frame: &mut Frame) {
        let left = TALLY_WIDTH + snapshot.cols as usize * CELL_WIDTH + 4;

        frame.put_str(left, 1, "LINES", None);
        frame.put_str(left + 7, 1, &snapshot.lines.to_string(), None);
        frame.put_str(left, 3, "SCORE", None);
        frame.put_str(left + 7, 3, &snapshot.score.to_string(), None);
        frame.put_str(left, 5, "HIGH", None);
        frame.put_str(left + 7, 5, &snapshot.high_score.to_string(), None);
        frame.put_str(left, 7, "LEVEL", None);
        frame.put_str(left + 7, 7, &snapshot.level.to_string(), None);

        frame.put_str(left, 9, "NEXT", None);
        if let Some(kind) = snapshot.next {
            self.draw_preview(kind, left, 10, frame);
        }

        let banner = match snapshot.phase {
            Phase::Idle => "press r to play",
            Phase::Running => "",
            Phase::Paused => "PAUSED",
            Phase::GameOver => "GAME OVER",
        };
        frame.put_str(left, 13, banner, None);
    }

    /// Draw a shape's rotation-0 silhouette in a 4x2 cell box.
    fn draw_preview(&self, kind: ShapeKind, left: usize, top: usize, frame: &mut Frame) {
        let mut piece = Piece::new(kind);
        piece.set_position(Vec2::new(1, 1));

        let color = Some(kind.color());
        for cell in piece.cells() {
            let sx = left + cell.x as usize * CELL_WIDTH;
            let sy = top + cell.y as usize;
            frame.put(sx, sy, '█', color);
            frame.put(sx + 1, sy, '█', color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfall_core::Session;

    fn rendered(session: &Session) -> Frame {
        let view = GameView;
        let mut frame = Frame::new(1, 1);
        view.render(&session.snapshot(), &mut frame);
        frame
    }

    fn frame_text(frame: &Frame) -> String {
        let mut out = String::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                out.push(frame.get(x, y).ch);
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn frame_resizes_to_fit_the_board() {
        let mut session = Session::with_defaults(1);
        session.start();
        let frame = rendered(&session);

        // 22-row board: 20 visible rows plus the border.
        assert_eq!(frame.height(), 22);
        assert_eq!(frame.width(), TALLY_WIDTH + 22 + 2 + PANEL_WIDTH);
    }

    #[test]
    fn panel_shows_score_labels_and_banner() {
        let mut session = Session::with_defaults(1);
        session.start();
        session.apply(gridfall_types::Command::Pause);

        let text = frame_text(&rendered(&session));
        assert!(text.contains("SCORE"));
        assert!(text.contains("HIGH"));
        assert!(text.contains("LEVEL"));
        assert!(text.contains("LINES"));
        assert!(text.contains("NEXT"));
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn spawn_buffer_rows_are_hidden() {
        let mut session = Session::with_defaults(1);
        session.start();

        // The freshly spawned piece occupies only rows 0-1, so the visible
        // board interior must contain no blocks yet.
        let frame = rendered(&session);
        let mut board_blocks = 0;
        for y in 1..21 {
            for x in (TALLY_WIDTH + 1)..(TALLY_WIDTH + 21) {
                if frame.get(x, y).ch == '█' {
                    board_blocks += 1;
                }
            }
        }
        assert_eq!(board_blocks, 0, "spawn rows leaked into the visible board");
    }

    #[test]
    fn locked_terrain_is_drawn_in_shape_color() {
        let mut session = Session::with_defaults(1);
        session.start();
        let bottom = session.grid().rows() - 1;
        session
            .grid_mut()
            .set_cell(Vec2::new(0, bottom), Some(ShapeKind::Z));

        let frame = rendered(&session);
        // Bottom row of the interior, first cell.
        let glyph = frame.get(TALLY_WIDTH + 1, 20);
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.fg, Some(ShapeKind::Z.color()));
    }

    #[test]
    fn tally_column_lists_every_shape() {
        let mut session = Session::with_defaults(1);
        session.start();
        let text = frame_text(&rendered(&session));
        for kind in ShapeKind::ALL {
            assert!(text.contains(&format!("{} x", kind.as_str())));
        }
    }
}
