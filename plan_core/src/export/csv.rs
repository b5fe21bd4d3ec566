//! Room schedule as CSV.
//!
//! One row per room in layout order. Names are always quoted; numeric
//! columns never are.

use crate::layout::LayoutData;

pub const CSV_HEADER: &str = "Room ID,Room Name,Area (sq ft),Width (ft),Height (ft),X Position,Y Position";

pub fn encode(layout: &LayoutData) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for room in &layout.rooms {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            room.id,
            quote(&room.name),
            room.area,
            room.width,
            room.height,
            room.x,
            room.y
        ));
    }
    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
