use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer point (cursor position or displacement vector)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer rectangle (window bounds, monitor bounds)
///
/// Edges are returned as `i64` so `x + width` cannot overflow for extreme
/// inputs. Width and height are expected to be non-negative but this is
/// not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i64 {
        i64::from(self.x)
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn top(&self) -> i64 {
        i64::from(self.y)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Center as floating point, since odd sizes put it between pixels
    pub fn center(&self) -> (f64, f64) {
        let (min_x, max_x) = ordered(self.left(), self.right());
        let (min_y, max_y) = ordered(self.top(), self.bottom());
        (
            (min_x as f64 + max_x as f64) / 2.0,
            (min_y as f64 + max_y as f64) / 2.0,
        )
    }

    /// Closest point of the closed rectangle to `point`
    ///
    /// Clamps each axis independently to `[min, max]`. Negative sizes are
    /// normalised so the clamp bounds are always ordered.
    pub fn closest_point(&self, point: Point) -> (i64, i64) {
        let (min_x, max_x) = ordered(self.left(), self.right());
        let (min_y, max_y) = ordered(self.top(), self.bottom());
        (
            i64::from(point.x).clamp(min_x, max_x),
            i64::from(point.y).clamp(min_y, max_y),
        )
    }

    /// Point lies in the interior (not on an edge), negative sizes normalised
    pub fn contains_strictly(&self, point: Point) -> bool {
        let (min_x, max_x) = ordered(self.left(), self.right());
        let (min_y, max_y) = ordered(self.top(), self.bottom());
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        px > min_x && px < max_x && py > min_y && py < max_y
    }

    /// Rectangle moved by `offset`, saturating at the i32 range
    pub fn translated(&self, offset: Point) -> Self {
        Self {
            x: self.x.saturating_add(offset.x),
            y: self.y.saturating_add(offset.y),
            ..*self
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}
