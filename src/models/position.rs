use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer position inside a dimension.
/// X increases left-to-right, Y increases top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Coordinates { x, y }
    }

    /// Travel distance: the larger of the axis differences.
    ///
    /// Computed in `i64` so opposite corners of the `i32` plane don't overflow.
    pub fn chebyshev_distance(&self, other: Coordinates) -> i64 {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx.max(dy)
    }

    pub fn euclidean_distance(&self, other: Coordinates) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Axis-aligned footprint of a body centred on its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Default for Extent {
    fn default() -> Self {
        Extent { width: 1, height: 1 }
    }
}

impl Extent {
    pub fn at_least(self, min: i32) -> Self {
        Extent {
            width: self.width.max(min),
            height: self.height.max(min),
        }
    }

    /// Whether `point` falls inside this extent centred on `centre`.
    pub fn contains(&self, centre: Coordinates, point: Coordinates) -> bool {
        let half_w = i64::from(self.width / 2);
        let half_h = i64::from(self.height / 2);
        let (cx, cy) = (i64::from(centre.x), i64::from(centre.y));
        (cx - half_w..=cx + half_w).contains(&i64::from(point.x))
            && (cy - half_h..=cy + half_h).contains(&i64::from(point.y))
    }
}
