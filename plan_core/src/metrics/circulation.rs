//! Circulation efficiency.
//!
//! Each resolvable path contributes `distance(from origin, to origin) * width`
//! as an approximate corridor area. The score rewards a low ratio of that
//! area to usable room area:
//!
//! ```text
//! efficiency = clamp(100 - (circulation_area / usable_area) * 50, 0, 100)
//! ```

use crate::geometry::origin_distance;
use crate::layout::LayoutData;

use super::to_score;

/// Scaling applied to the circulation-to-usable ratio
const RATIO_PENALTY: f64 = 50.0;

/// Approximate circulation area over all resolvable paths
pub fn circulation_area(layout: &LayoutData) -> f64 {
    layout
        .circulation
        .iter()
        .filter_map(|path| match layout.resolve(path) {
            Some((from, to)) => Some(origin_distance(from, to) * path.width),
            None => {
                tracing::debug!(path = %path.describe(), "skipping unresolved circulation path");
                None
            }
        })
        .sum()
}

/// Circulation efficiency score, 0 when the layout has no usable area
pub fn circulation_efficiency(layout: &LayoutData) -> u32 {
    let usable = layout.total_area();
    if usable <= 0.0 {
        return 0;
    }
    to_score(100.0 - (circulation_area(layout) / usable) * RATIO_PENALTY)
}
