//! Integer cell coordinates used as keys into the voxel index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one unit cell of the world grid.
///
/// Cells are addressed by their integer centre; a unit cube placed at
/// `Coordinate { x, y, z }` spans `[x - 0.5, x + 0.5]` on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Grid X coordinate.
    pub x: i32,
    /// Grid Y coordinate.
    pub y: i32,
    /// Grid Z coordinate.
    pub z: i32,
}

impl Coordinate {
    /// The world origin (sphere centre).
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Creates a new coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate offset by `(dx, dy, dz)`.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Cell containing the point `(x, y, z)`, rounding each component
    /// half-up (`floor(v + 0.5)`) so `-0.5` maps to `0`.
    pub fn round_from(x: f64, y: f64, z: f64) -> Self {
        let round = |v: f64| (v + 0.5).floor() as i32;
        Self {
            x: round(x),
            y: round(y),
            z: round(z),
        }
    }

    /// Squared Euclidean distance from the origin, exact in integer math.
    pub fn length_squared(self) -> i64 {
        let (x, y, z) = (i64::from(self.x), i64::from(self.y), i64::from(self.z));
        x * x + y * y + z * z
    }

    /// Euclidean distance from the origin.
    pub fn length(self) -> f64 {
        (self.length_squared() as f64).sqrt()
    }

    /// Cell centre as an `f32` translation, the only per-instance transform
    /// a unit cube needs.
    pub fn translation(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

impl From<(i32, i32, i32)> for Coordinate {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl From<Coordinate> for (i32, i32, i32) {
    fn from(c: Coordinate) -> Self {
        (c.x, c.y, c.z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
