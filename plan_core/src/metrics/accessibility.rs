//! Accessibility score.
//!
//! One check per circulation path (is it at least the minimum corridor
//! width?) and one per room (does some incident path meet the minimum?).
//! The score is the share of checks that pass, 100 when there are none.
//!
//! Path width checks do not require resolvable endpoints; a room counts a
//! path as incident whenever the path names it.

use crate::layout::LayoutData;

use super::to_score;

pub fn accessibility_score(layout: &LayoutData, min_corridor_width_ft: f64) -> u32 {
    let total_checks = layout.circulation.len() + layout.rooms.len();
    if total_checks == 0 {
        return 100;
    }

    let narrow_paths = layout
        .circulation
        .iter()
        .filter(|p| p.width < min_corridor_width_ft)
        .count();

    let unreachable_rooms = layout
        .rooms
        .iter()
        .filter(|room| {
            !layout
                .circulation
                .iter()
                .any(|p| p.touches(&room.id) && p.width >= min_corridor_width_ft)
        })
        .count();

    let failures = narrow_paths + unreachable_rooms;
    to_score(100.0 * (total_checks - failures) as f64 / total_checks as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CirculationPath, Room};
    use crate::metrics::DEFAULT_MIN_CORRIDOR_WIDTH_FT;

    fn rooms() -> Vec<Room> {
        vec![
            Room::new("a", "Office", 100.0, 0.0, 0.0, 10.0, 10.0),
            Room::new("b", "Kitchen", 100.0, 10.0, 0.0, 10.0, 10.0),
            Room::new("c", "Bedroom", 100.0, 20.0, 0.0, 10.0, 10.0),
        ]
    }

    #[test]
    fn test_all_checks_pass() {
        let layout = LayoutData::new(
            rooms(),
            vec![CirculationPath::new("a", "b", 4.0), CirculationPath::new("b", "c", 5.0)],
        );
        assert_eq!(accessibility_score(&layout, DEFAULT_MIN_CORRIDOR_WIDTH_FT), 100);
    }

    #[test]
    fn test_narrow_path_fails_path_and_isolated_room() {
        // 2 paths + 3 rooms = 5 checks; the 3 ft path fails and room c has no wide path
        let layout = LayoutData::new(
            rooms(),
            vec![CirculationPath::new("a", "b", 4.0), CirculationPath::new("b", "c", 3.0)],
        );
        assert_eq!(accessibility_score(&layout, DEFAULT_MIN_CORRIDOR_WIDTH_FT), 60);
    }

    #[test]
    fn test_rooms_without_paths_fail() {
        let layout = LayoutData::new(rooms(), vec![]);
        assert_eq!(accessibility_score(&layout, DEFAULT_MIN_CORRIDOR_WIDTH_FT), 0);
    }

    #[test]
    fn test_zero_checks_scores_100() {
        assert_eq!(accessibility_score(&LayoutData::empty(), DEFAULT_MIN_CORRIDOR_WIDTH_FT), 100);
    }

    #[test]
    fn test_custom_minimum() {
        let layout = LayoutData::new(
            rooms(),
            vec![CirculationPath::new("a", "b", 3.0), CirculationPath::new("b", "c", 3.0)],
        );
        assert_eq!(accessibility_score(&layout, 3.0), 100);
    }
}
