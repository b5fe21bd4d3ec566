//! Energy efficiency.
//!
//! Rewards compact plans with short envelopes and many shared walls:
//!
//! ```text
//! compactness     = total_room_area / bounding_box_area
//! perimeter_ratio = bounding_box_perimeter / sqrt(bounding_box_area)
//! adjacency       = adjacent_pairs / possible_pairs
//!
//! score = 0.4 * min(100, compactness * 100)
//!       + 0.3 * max(0, 100 - perimeter_ratio * 10)
//!       + 0.3 * (adjacency * 20)
//! ```
//!
//! The weights are empirical and preserved exactly.

use crate::geometry::{are_adjacent, bounds, EmptyBounds};
use crate::layout::{LayoutData, Room};

use super::to_score;

const COMPACTNESS_WEIGHT: f64 = 0.4;
const PERIMETER_WEIGHT: f64 = 0.3;
const ADJACENCY_WEIGHT: f64 = 0.3;

/// Fraction of room pairs that share a wall.
///
/// Zero when the layout has fewer than two rooms.
pub fn adjacency_score(rooms: &[Room]) -> f64 {
    let n = rooms.len();
    if n < 2 {
        return 0.0;
    }

    let mut adjacent = 0usize;
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if are_adjacent(a, b) {
                adjacent += 1;
            }
        }
    }

    let possible = n * (n - 1) / 2;
    adjacent as f64 / possible as f64
}

/// Energy efficiency score, 0 for an empty or degenerate layout
pub fn energy_efficiency(layout: &LayoutData) -> u32 {
    if layout.rooms.is_empty() {
        return 0;
    }

    let building = bounds(&layout.rooms, EmptyBounds::Metrics);
    let building_area = building.area();
    if building_area <= 0.0 {
        return 0;
    }

    let compactness = layout.total_area() / building_area;
    let perimeter_ratio = building.perimeter() / building_area.sqrt();
    let adjacency = adjacency_score(&layout.rooms);

    let score = COMPACTNESS_WEIGHT * (compactness * 100.0).min(100.0)
        + PERIMETER_WEIGHT * (100.0 - perimeter_ratio * 10.0).max(0.0)
        + ADJACENCY_WEIGHT * (adjacency * 20.0);

    to_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_pair_counts() {
        let rooms = vec![
            Room::new("a", "A", 10_000.0, 0.0, 0.0, 100.0, 100.0),
            Room::new("b", "B", 10_000.0, 100.0, 0.0, 100.0, 100.0),
        ];
        assert_eq!(adjacency_score(&rooms), 1.0);
    }

    #[test]
    fn test_adjacency_over_possible_pairs() {
        let rooms = vec![
            Room::new("a", "A", 100.0, 0.0, 0.0, 10.0, 10.0),
            Room::new("b", "B", 100.0, 10.0, 0.0, 10.0, 10.0),
            Room::new("c", "C", 100.0, 50.0, 50.0, 10.0, 10.0),
        ];
        assert!((adjacency_score(&rooms) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_adjacent_squares() {
        // compactness 1.0 -> 40; perimeter 600 / sqrt(20000) = 4.243 -> 30 * 0.5757 = 17.27;
        // adjacency 1.0 -> 6; total 63.27 -> 63
        let layout = LayoutData::new(
            vec![
                Room::new("a", "A", 10_000.0, 0.0, 0.0, 100.0, 100.0),
                Room::new("b", "B", 10_000.0, 100.0, 0.0, 100.0, 100.0),
            ],
            vec![],
        );
        assert_eq!(energy_efficiency(&layout), 63);
    }

    #[test]
    fn test_empty_layout_scores_zero() {
        assert_eq!(energy_efficiency(&LayoutData::empty()), 0);
    }
}
