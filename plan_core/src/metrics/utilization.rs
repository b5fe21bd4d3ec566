//! Space utilization: room area as a share of the bounding box.

use crate::geometry::{bounds, EmptyBounds};
use crate::layout::LayoutData;

use super::to_score;

/// `min(100, round(100 * total_room_area / bounding_box_area))`
pub fn space_utilization(layout: &LayoutData) -> u32 {
    let building_area = bounds(&layout.rooms, EmptyBounds::Metrics).area();
    if building_area <= 0.0 {
        return 0;
    }
    to_score(100.0 * layout.total_area() / building_area)
}
