//! Piece geometry and rotation through the public facade.

use gridfall::core::{Grid, Piece};
use gridfall::types::{ShapeKind, Vec2};

fn drawn(kind: ShapeKind, pivot: Vec2, grid: &mut Grid) -> Piece {
    let mut piece = Piece::new(kind);
    piece.set_position(pivot);
    assert!(grid.draw_piece(&piece), "setup draw failed for {kind:?}");
    piece
}

#[test]
fn spawn_offsets_match_the_shape_table() {
    let pivot = Vec2::new(5, 10);
    let expect = |kind: ShapeKind, offsets: [(i32, i32); 3]| {
        let mut piece = Piece::new(kind);
        piece.set_position(pivot);
        for (cell, (dx, dy)) in piece.cells()[1..].iter().zip(offsets) {
            assert_eq!(*cell, pivot + Vec2::new(dx, dy), "{kind:?}");
        }
    };

    expect(ShapeKind::I, [(-1, 0), (2, 0), (1, 0)]);
    expect(ShapeKind::J, [(-1, 0), (-1, -1), (1, 0)]);
    expect(ShapeKind::L, [(1, 0), (1, -1), (-1, 0)]);
    expect(ShapeKind::O, [(1, 0), (1, -1), (0, -1)]);
    expect(ShapeKind::S, [(-1, 0), (0, -1), (1, -1)]);
    expect(ShapeKind::T, [(-1, 0), (0, -1), (1, 0)]);
    expect(ShapeKind::Z, [(0, -1), (-1, -1), (1, 0)]);
}

#[test]
fn four_rotations_in_either_direction_are_identity() {
    for kind in ShapeKind::ALL {
        for clockwise in [true, false] {
            let mut grid = Grid::new(22, 10);
            let mut piece = drawn(kind, Vec2::new(4, 10), &mut grid);
            let home = *piece.cells();

            for step in 0..4 {
                assert!(
                    piece.rotate(clockwise, &mut grid),
                    "{kind:?} rotation {step} failed (clockwise={clockwise})"
                );
            }

            assert_eq!(*piece.cells(), home, "{kind:?} full cycle drifted");
            assert_eq!(piece.rotation(), 0);

            // The grid holds exactly the piece's four cells.
            let occupied = grid.cells().iter().filter(|c| c.is_some()).count();
            assert_eq!(occupied, 4);
        }
    }
}

#[test]
fn rotation_keeps_the_grid_in_sync() {
    let mut grid = Grid::new(22, 10);
    let mut piece = drawn(ShapeKind::L, Vec2::new(4, 10), &mut grid);

    assert!(piece.rotate(true, &mut grid));
    for &cell in piece.cells() {
        assert_eq!(grid.cell(cell), Some(Some(ShapeKind::L)));
    }
    let occupied = grid.cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(occupied, 4);
}

#[test]
fn i_piece_against_the_left_wall_kicks_or_restores() {
    let mut grid = Grid::new(22, 10);

    // Stand the I upright, flush against the left wall.
    let mut piece = drawn(ShapeKind::I, Vec2::new(4, 10), &mut grid);
    assert!(piece.rotate(true, &mut grid));
    while piece.translate(Vec2::LEFT, &mut grid, true) {}
    assert!(piece.cells().iter().all(|c| c.x == piece.cells()[0].x));
    assert_eq!(piece.cells()[0].x, 0);

    let before = *piece.cells();
    let rotated = piece.rotate(true, &mut grid);

    if rotated {
        // The kick moved every cell back onto the board.
        assert!(piece.cells().iter().all(|c| (0..10).contains(&c.x)));
    } else {
        // A clean failure restores the geometry exactly.
        assert_eq!(*piece.cells(), before);
    }

    // Either way the piece's cells are drawn and nothing else is.
    let occupied = grid.cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(occupied, 4);
    for &cell in piece.cells() {
        assert!(!grid.is_empty_at(cell));
    }
}

#[test]
fn boxed_in_rotation_fails_and_restores() {
    let mut grid = Grid::new(22, 10);
    let mut piece = drawn(ShapeKind::S, Vec2::new(4, 19), &mut grid);

    // Surround the piece completely.
    for x in 0..10 {
        for y in 15..22 {
            let pos = Vec2::new(x, y);
            if !piece.cells().contains(&pos) {
                grid.set_cell(pos, Some(ShapeKind::J));
            }
        }
    }

    let before = *piece.cells();
    let rotation_before = piece.rotation();

    assert!(!piece.rotate(true, &mut grid));
    assert!(!piece.rotate(false, &mut grid));

    assert_eq!(*piece.cells(), before);
    assert_eq!(piece.rotation(), rotation_before);
}

#[test]
fn o_piece_rotation_succeeds_without_moving() {
    let mut grid = Grid::new(22, 10);
    let mut piece = drawn(ShapeKind::O, Vec2::new(4, 10), &mut grid);
    let home = *piece.cells();

    for step in 1..=4 {
        assert!(piece.rotate(true, &mut grid));
        assert_eq!(*piece.cells(), home, "O drifted at step {step}");
        assert_eq!(piece.rotation(), step % 4);
    }
}

#[test]
fn translate_moves_all_four_cells_together() {
    let mut grid = Grid::new(22, 10);
    let mut piece = drawn(ShapeKind::J, Vec2::new(4, 10), &mut grid);
    let before = *piece.cells();

    assert!(piece.translate(Vec2::DOWN, &mut grid, true));
    for (after, origin) in piece.cells().iter().zip(before) {
        assert_eq!(*after, origin + Vec2::DOWN);
    }

    // Old cells are vacated, new ones occupied.
    let occupied = grid.cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(occupied, 4);
}

#[test]
fn translate_into_terrain_is_rejected() {
    let mut grid = Grid::new(22, 10);
    let mut piece = drawn(ShapeKind::T, Vec2::new(4, 20), &mut grid);

    // Floor directly below the piece.
    for x in 0..10 {
        grid.set_cell(Vec2::new(x, 21), Some(ShapeKind::I));
    }

    let before = *piece.cells();
    assert!(!piece.translate(Vec2::DOWN, &mut grid, true));
    assert_eq!(*piece.cells(), before);
}
