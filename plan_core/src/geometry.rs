//! # Geometry Helpers
//!
//! Axis-aligned bounds of a room set, shared by the metrics calculator and
//! the export encoders, plus the rectangle predicates the metrics need.
//!
//! An empty room set has no natural bounding box. Metrics want exactly zero
//! so that empty layouts score zero; exports want a visible canvas. Callers
//! pick the default with [`EmptyBounds`].
//!
//! ```rust
//! use plan_core::geometry::{bounds, EmptyBounds};
//!
//! let b = bounds(&[], EmptyBounds::Export);
//! assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (0.0, 100.0, 0.0, 100.0));
//! assert_eq!(bounds(&[], EmptyBounds::Metrics).area(), 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::layout::Room;

/// Tolerance for treating two edge coordinates as coincident
pub const EDGE_EPSILON: f64 = 1e-6;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }
}

/// Which box to report for an empty room set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyBounds {
    /// `{0, 0, 0, 0}` so empty layouts score exactly zero
    Metrics,
    /// `{0, 100, 0, 100}` so empty exports still have a canvas
    Export,
}

impl EmptyBounds {
    fn default_box(self) -> Bounds {
        match self {
            EmptyBounds::Metrics => Bounds {
                min_x: 0.0,
                max_x: 0.0,
                min_y: 0.0,
                max_y: 0.0,
            },
            EmptyBounds::Export => Bounds {
                min_x: 0.0,
                max_x: 100.0,
                min_y: 0.0,
                max_y: 100.0,
            },
        }
    }
}

/// Compute the bounding box of `rooms`, O(n).
pub fn bounds(rooms: &[Room], empty: EmptyBounds) -> Bounds {
    let Some(first) = rooms.first() else {
        return empty.default_box();
    };

    rooms.iter().skip(1).fold(
        Bounds {
            min_x: first.x,
            max_x: first.right(),
            min_y: first.y,
            max_y: first.bottom(),
        },
        |b, r| Bounds {
            min_x: b.min_x.min(r.x),
            max_x: b.max_x.max(r.right()),
            min_y: b.min_y.min(r.y),
            max_y: b.max_y.max(r.bottom()),
        },
    )
}

/// Euclidean distance between the top-left corners of two rooms
pub fn origin_distance(a: &Room, b: &Room) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Whether two rooms share an edge.
///
/// One room's right edge must coincide with the other's left edge while
/// their vertical extents overlap, or the vertical analogue. Corner-only
/// contact does not count.
pub fn are_adjacent(a: &Room, b: &Room) -> bool {
    let vertical_overlap = a.y < b.bottom() - EDGE_EPSILON && b.y < a.bottom() - EDGE_EPSILON;
    let horizontal_overlap = a.x < b.right() - EDGE_EPSILON && b.x < a.right() - EDGE_EPSILON;

    let side_by_side = coincident(a.right(), b.x) || coincident(b.right(), a.x);
    let stacked = coincident(a.bottom(), b.y) || coincident(b.bottom(), a.y);

    (side_by_side && vertical_overlap) || (stacked && horizontal_overlap)
}

fn coincident(a: f64, b: f64) -> bool {
    (a - b).abs() <= EDGE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, x: f64, y: f64, w: f64, h: f64) -> Room {
        Room::new(id, id, w * h, x, y, w, h)
    }

    #[test]
    fn test_bounds_of_rooms() {
        let rooms = vec![room("a", 0.0, 0.0, 10.0, 10.0), room("b", 10.0, 5.0, 5.0, 20.0)];
        let b = bounds(&rooms, EmptyBounds::Metrics);
        assert_eq!(b.min_x, 0.0);
        assert_eq!(b.max_x, 15.0);
        assert_eq!(b.min_y, 0.0);
        assert_eq!(b.max_y, 25.0);
        assert_eq!(b.area(), 375.0);
    }

    #[test]
    fn test_empty_bounds_defaults_differ() {
        assert_eq!(bounds(&[], EmptyBounds::Metrics).width(), 0.0);
        assert_eq!(bounds(&[], EmptyBounds::Export).width(), 100.0);
    }

    #[test]
    fn test_horizontal_adjacency() {
        let a = room("a", 0.0, 0.0, 100.0, 100.0);
        let b = room("b", 100.0, 0.0, 100.0, 100.0);
        assert!(are_adjacent(&a, &b));
        assert!(are_adjacent(&b, &a));
    }

    #[test]
    fn test_vertical_adjacency() {
        let a = room("a", 0.0, 0.0, 10.0, 10.0);
        let b = room("b", 5.0, 10.0, 10.0, 10.0);
        assert!(are_adjacent(&a, &b));
    }

    #[test]
    fn test_corner_touch_and_gap_are_not_adjacent() {
        let a = room("a", 0.0, 0.0, 10.0, 10.0);
        let corner = room("b", 10.0, 10.0, 10.0, 10.0);
        let gap = room("c", 11.0, 0.0, 10.0, 10.0);
        assert!(!are_adjacent(&a, &corner));
        assert!(!are_adjacent(&a, &gap));
    }

    #[test]
    fn test_origin_distance() {
        let a = room("a", 0.0, 0.0, 1.0, 1.0);
        let b = room("b", 3.0, 4.0, 1.0, 1.0);
        assert_eq!(origin_distance(&a, &b), 5.0);
    }
}
