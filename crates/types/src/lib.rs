//! Shared data types for the falling-block engine.
//!
//! Everything in this crate is a pure value type with no dependencies, so it
//! can be used from the core rules, the terminal front-end, and the input
//! layer alike.
//!
//! # Coordinate system
//!
//! The grid origin is the top-left cell and **y increases downward**, matching
//! how rows are laid out on screen. The unit constants on [`Vec2`] are named
//! by screen direction, so `Vec2::DOWN == Vec2::new(0, 1)` is the gravity
//! direction.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Integer 2D coordinate with value semantics.
///
/// Used both for absolute grid positions and for relative offsets (spawn
/// geometry, kick offsets, movement deltas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0, 0);
    pub const LEFT: Vec2 = Vec2::new(-1, 0);
    pub const RIGHT: Vec2 = Vec2::new(1, 0);
    /// One row up the screen (toward the spawn buffer).
    pub const UP: Vec2 = Vec2::new(0, -1);
    /// One row down the screen (the gravity direction).
    pub const DOWN: Vec2 = Vec2::new(0, 1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// 24-bit display color for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All shapes, in tally order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Stable index into per-shape tables (tallies, previews).
    pub fn index(self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::J => 1,
            ShapeKind::L => 2,
            ShapeKind::O => 3,
            ShapeKind::S => 4,
            ShapeKind::T => 5,
            ShapeKind::Z => 6,
        }
    }

    /// Display color of the shape's tiles.
    pub fn color(self) -> Rgb {
        match self {
            ShapeKind::I => Rgb::new(0, 235, 235),
            ShapeKind::J => Rgb::new(0, 0, 255),
            ShapeKind::L => Rgb::new(255, 128, 0),
            ShapeKind::O => Rgb::new(235, 235, 0),
            ShapeKind::S => Rgb::new(0, 235, 0),
            ShapeKind::T => Rgb::new(235, 0, 235),
            ShapeKind::Z => Rgb::new(235, 0, 0),
        }
    }

    /// One-letter label, used by the tally column.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }
}

/// Discrete player commands, as produced by the input dispatcher.
///
/// `SoftDrop` is a toggle: issuing it switches the fall period between the
/// normal value and the fast soft-drop value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Pause,
    Restart,
}

/// Session lifecycle states.
///
/// `Idle` before the first start; `GameOver` is terminal until a `Restart`
/// command brings the session back to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}
