//! Daylight hours estimate.
//!
//! A heuristic proxy for solar exposure, not a daylight simulation. Each room
//! is scored by how close it sits to each side of the building's bounding
//! box, weighted by orientation (south favoured, north least), then scaled by
//! room area normalised to 1000 sq ft. The average room score maps onto an
//! hours figure:
//!
//! ```text
//! proximity(side) = max(0, 1 - distance_to_side / building_dimension)
//! room_score      = sum(weight(side) * proximity(side)) * area / 1000
//! hours           = clamp(avg(room_score) * 8 + 4, 3, 12)   (1 decimal)
//! ```
//!
//! The constants are empirical and kept for compatibility with existing
//! scores. North is the top of the plan (minimum y).

use crate::geometry::{bounds, Bounds, EmptyBounds};
use crate::layout::{LayoutData, Room};

pub const MIN_DAYLIGHT_HOURS: f64 = 3.0;
pub const MAX_DAYLIGHT_HOURS: f64 = 12.0;

const NORTH_WEIGHT: f64 = 0.3;
const SOUTH_WEIGHT: f64 = 1.0;
const EAST_WEIGHT: f64 = 0.7;
const WEST_WEIGHT: f64 = 0.7;

const AREA_NORMALIZATION_SQ_FT: f64 = 1000.0;
const HOURS_PER_SCORE: f64 = 8.0;
const BASE_HOURS: f64 = 4.0;

/// Estimated daylight hours for the layout.
///
/// An empty layout reports the 3-hour floor.
pub fn daylight_hours(layout: &LayoutData) -> f64 {
    if layout.rooms.is_empty() {
        return MIN_DAYLIGHT_HOURS;
    }

    let building = bounds(&layout.rooms, EmptyBounds::Metrics);
    let total: f64 = layout.rooms.iter().map(|room| room_exposure(room, &building)).sum();
    let average = total / layout.rooms.len() as f64;

    let hours = (average * HOURS_PER_SCORE + BASE_HOURS).clamp(MIN_DAYLIGHT_HOURS, MAX_DAYLIGHT_HOURS);
    if !hours.is_finite() {
        return MIN_DAYLIGHT_HOURS;
    }
    (hours * 10.0).round() / 10.0
}

/// Orientation-weighted edge proximity of one room, scaled by its area
fn room_exposure(room: &Room, building: &Bounds) -> f64 {
    let north = proximity(room.y - building.min_y, building.height());
    let south = proximity(building.max_y - room.bottom(), building.height());
    let east = proximity(building.max_x - room.right(), building.width());
    let west = proximity(room.x - building.min_x, building.width());

    let weighted = NORTH_WEIGHT * north + SOUTH_WEIGHT * south + EAST_WEIGHT * east + WEST_WEIGHT * west;
    weighted * (room.area / AREA_NORMALIZATION_SQ_FT)
}

fn proximity(distance: f64, dimension: f64) -> f64 {
    if dimension <= 0.0 {
        return 1.0;
    }
    (1.0 - distance / dimension).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Room;

    #[test]
    fn test_single_room_touches_every_side() {
        // Weighted sum 2.7 * (500 / 1000) = 1.35 -> 1.35 * 8 + 4 = 14.8 -> clamp 12
        let layout = LayoutData::new(vec![Room::new("a", "Living", 500.0, 0.0, 0.0, 20.0, 25.0)], vec![]);
        assert_eq!(daylight_hours(&layout), 12.0);
    }

    #[test]
    fn test_small_room_rounds_to_one_decimal() {
        // 2.7 * 0.1 = 0.27 -> 0.27 * 8 + 4 = 6.16 -> 6.2
        let layout = LayoutData::new(vec![Room::new("a", "Office", 100.0, 0.0, 0.0, 10.0, 10.0)], vec![]);
        assert_eq!(daylight_hours(&layout), 6.2);
    }

    #[test]
    fn test_south_rooms_beat_north_rooms() {
        let north = Room::new("n", "North", 100.0, 0.0, 0.0, 10.0, 10.0);
        let south = Room::new("s", "South", 100.0, 0.0, 30.0, 10.0, 10.0);
        let building = Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 40.0,
        };
        assert!(room_exposure(&south, &building) > room_exposure(&north, &building));
    }

    #[test]
    fn test_empty_layout_reports_floor() {
        assert_eq!(daylight_hours(&LayoutData::empty()), MIN_DAYLIGHT_HOURS);
    }
}
