//! DXF (R12 ASCII) export.
//!
//! Output is a sequence of group-code/value line pairs:
//!
//! ```text
//! HEADER    $ACADVER, $INSUNITS, $EXTMIN, $EXTMAX
//! TABLES    LAYER table: ROOMS, CIRCULATION, TEXT
//! ENTITIES  POLYLINE + 5 VERTEX + SEQEND per room   (ROOMS)
//!           TEXT at each room center                (TEXT, optional)
//!           LINE between connected room centers     (CIRCULATION)
//! EOF
//! ```
//!
//! Coordinates are written in plan units as-is.

use crate::geometry::{bounds, EmptyBounds};
use crate::layout::{LayoutData, Room};

use super::ExportOptions;

pub const LAYER_ROOMS: &str = "ROOMS";
pub const LAYER_CIRCULATION: &str = "CIRCULATION";
pub const LAYER_TEXT: &str = "TEXT";

/// (name, ACI color)
const LAYERS: [(&str, u8); 3] = [(LAYER_ROOMS, 7), (LAYER_CIRCULATION, 1), (LAYER_TEXT, 3)];

/// $INSUNITS 2 = feet
const INSUNITS_FEET: u8 = 2;

struct DxfWriter {
    out: String,
}

impl DxfWriter {
    fn new() -> Self {
        DxfWriter { out: String::new() }
    }

    fn pair(&mut self, code: u16, value: impl std::fmt::Display) {
        self.out.push_str(&format!("{}\n{}\n", code, value));
    }

    fn point(&mut self, x_code: u16, x: f64, y: f64) {
        self.pair(x_code, x);
        self.pair(x_code + 10, y);
    }

    fn begin_section(&mut self, name: &str) {
        self.pair(0, "SECTION");
        self.pair(2, name);
    }

    fn end_section(&mut self) {
        self.pair(0, "ENDSEC");
    }

    fn finish(mut self) -> String {
        self.pair(0, "EOF");
        self.out
    }
}

/// Render the layout as a DXF document.
pub fn encode(layout: &LayoutData, options: &ExportOptions) -> String {
    let mut w = DxfWriter::new();
    let b = bounds(&layout.rooms, EmptyBounds::Export);

    w.begin_section("HEADER");
    w.pair(9, "$ACADVER");
    w.pair(1, "AC1009");
    w.pair(9, "$INSUNITS");
    w.pair(70, INSUNITS_FEET);
    w.pair(9, "$EXTMIN");
    w.point(10, b.min_x, b.min_y);
    w.pair(9, "$EXTMAX");
    w.point(10, b.max_x, b.max_y);
    w.end_section();

    w.begin_section("TABLES");
    w.pair(0, "TABLE");
    w.pair(2, "LAYER");
    w.pair(70, LAYERS.len());
    for (name, color) in LAYERS {
        w.pair(0, "LAYER");
        w.pair(2, name);
        w.pair(70, 0);
        w.pair(62, color);
        w.pair(6, "CONTINUOUS");
    }
    w.pair(0, "ENDTAB");
    w.end_section();

    w.begin_section("ENTITIES");
    for room in &layout.rooms {
        write_room(&mut w, room);
        if options.include_text {
            write_label(&mut w, room);
        }
    }
    for path in &layout.circulation {
        let Some((from, to)) = layout.resolve(path) else {
            continue;
        };
        let (x1, y1) = from.center();
        let (x2, y2) = to.center();
        w.pair(0, "LINE");
        w.pair(8, LAYER_CIRCULATION);
        w.point(10, x1, y1);
        w.point(11, x2, y2);
    }
    w.end_section();

    w.finish()
}

/// Closed polyline: four corners plus the first corner again
fn write_room(w: &mut DxfWriter, room: &Room) {
    let corners = [
        (room.x, room.y),
        (room.right(), room.y),
        (room.right(), room.bottom()),
        (room.x, room.bottom()),
        (room.x, room.y),
    ];

    w.pair(0, "POLYLINE");
    w.pair(8, LAYER_ROOMS);
    w.pair(66, 1);
    w.pair(70, 1);
    for (x, y) in corners {
        w.pair(0, "VERTEX");
        w.pair(8, LAYER_ROOMS);
        w.point(10, x, y);
    }
    w.pair(0, "SEQEND");
    w.pair(8, LAYER_ROOMS);
}

fn write_label(w: &mut DxfWriter, room: &Room) {
    let (cx, cy) = room.center();
    let height = (room.width.min(room.height) * 0.1).max(0.5);

    w.pair(0, "TEXT");
    w.pair(8, LAYER_TEXT);
    w.point(10, cx, cy);
    w.pair(40, height);
    w.pair(1, room.name.replace(['\r', '\n'], " "));
    // middle-center justification, aligned on the second point
    w.pair(72, 1);
    w.pair(73, 2);
    w.point(11, cx, cy);
}
