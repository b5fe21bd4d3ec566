//! SVG export.

use crate::geometry::{bounds, Bounds, EmptyBounds};
use crate::layout::{LayoutData, Room};

use super::{escape_xml, ExportOptions};

const STYLE: &str = ".room { fill: #f4f1ea; stroke: #333333; stroke-width: 1; }
    .room-label { font-family: sans-serif; fill: #222222; text-anchor: middle; dominant-baseline: middle; }
    .circulation { stroke: #c0392b; stroke-linecap: round; stroke-dasharray: 6 3; opacity: 0.7; }";

/// Maps plan coordinates into the padded, scaled canvas
struct Canvas {
    origin_x: f64,
    origin_y: f64,
    scale: f64,
    padding: f64,
    width: f64,
    height: f64,
}

impl Canvas {
    fn new(b: &Bounds, options: &ExportOptions) -> Self {
        let scale = if options.scale.is_finite() && options.scale > 0.0 {
            options.scale
        } else {
            1.0
        };
        let padding = options.padding.max(0.0);
        Canvas {
            origin_x: b.min_x,
            origin_y: b.min_y,
            scale,
            padding,
            width: (b.width() * scale + 2.0 * padding).max(1.0),
            height: (b.height() * scale + 2.0 * padding).max(1.0),
        }
    }

    fn x(&self, x: f64) -> f64 {
        (x - self.origin_x) * self.scale + self.padding
    }

    fn y(&self, y: f64) -> f64 {
        (y - self.origin_y) * self.scale + self.padding
    }

    fn len(&self, v: f64) -> f64 {
        v * self.scale
    }
}

/// Standalone SVG document with XML declaration.
pub fn encode(layout: &LayoutData, options: &ExportOptions) -> String {
    let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&render_svg_element(layout, options));
    svg
}

/// The `<svg>` element alone, for embedding in HTML.
pub fn render_svg_element(layout: &LayoutData, options: &ExportOptions) -> String {
    let canvas = Canvas::new(&bounds(&layout.rooms, EmptyBounds::Export), options);
    let font_size = (canvas.len(1.0) * 1.2).clamp(8.0, 24.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = canvas.width,
        h = canvas.height
    ));
    svg.push_str(&format!("  <style>\n    {}\n  </style>\n", STYLE));

    svg.push_str("  <g class=\"rooms\">\n");
    for room in &layout.rooms {
        svg.push_str(&format!(
            "    <rect class=\"room\" data-id=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
            escape_xml(&room.id),
            canvas.x(room.x),
            canvas.y(room.y),
            canvas.len(room.width).max(0.0),
            canvas.len(room.height).max(0.0)
        ));
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g class=\"circulation-paths\">\n");
    for path in &layout.circulation {
        let Some((from, to)) = layout.resolve(path) else {
            continue;
        };
        let stroke = canvas.len(path.width).clamp(1.0, 12.0);
        let ((x1, y1), (x2, y2)) = (center(&canvas, from), center(&canvas, to));
        svg.push_str(&format!(
            "    <line class=\"circulation\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke-width=\"{}\"/>\n",
            x1, y1, x2, y2, stroke
        ));
    }
    svg.push_str("  </g>\n");

    if options.include_text {
        svg.push_str("  <g class=\"labels\">\n");
        for room in &layout.rooms {
            let (cx, cy) = center(&canvas, room);
            svg.push_str(&format!(
                "    <text class=\"room-label\" x=\"{}\" y=\"{}\" font-size=\"{}\">{}</text>\n",
                cx,
                cy,
                font_size,
                escape_xml(&room.name)
            ));
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn center(canvas: &Canvas, room: &Room) -> (f64, f64) {
    let (cx, cy) = room.center();
    (canvas.x(cx), canvas.y(cy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{sample_layout, CirculationPath};

    #[test]
    fn test_viewbox_from_bounds() {
        // sample layout spans 30 x 27
        let options = ExportOptions {
            scale: 10.0,
            padding: 20.0,
            ..ExportOptions::default()
        };
        let svg = encode(&sample_layout(), &options);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0 0 340 310\""));
    }

    #[test]
    fn test_empty_layout_gets_default_canvas() {
        let options = ExportOptions {
            padding: 0.0,
            ..ExportOptions::default()
        };
        let svg = encode(&LayoutData::empty(), &options);
        assert!(svg.contains("viewBox=\"0 0 100 100\""));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_rooms_lines_and_labels() {
        let mut layout = sample_layout();
        let resolved = layout.circulation.len();
        layout.circulation.push(CirculationPath::new("ghost", "kitchen", 4.0));

        let svg = encode(&layout, &ExportOptions::default());
        assert_eq!(svg.matches("<rect class=\"room\"").count(), layout.rooms.len());
        assert_eq!(svg.matches("<line class=\"circulation\"").count(), resolved);
        assert_eq!(svg.matches("<text class=\"room-label\"").count(), layout.rooms.len());
        assert!(svg.contains(">Primary Bedroom</text>"));
    }

    #[test]
    fn test_names_are_escaped() {
        let layout = LayoutData::new(
            vec![Room::new("a", "Tom & Jerry's <Den>", 100.0, 0.0, 0.0, 10.0, 10.0)],
            vec![],
        );
        let svg = encode(&layout, &ExportOptions::default());
        assert!(svg.contains("Tom &amp; Jerry&#39;s &lt;Den&gt;"));
        assert!(!svg.contains("<Den>"));
    }

    #[test]
    fn test_room_positions_are_offset_by_padding() {
        let layout = LayoutData::new(vec![Room::new("a", "A", 100.0, 5.0, 5.0, 10.0, 10.0)], vec![]);
        let svg = encode(&layout, &ExportOptions::default());
        assert!(svg.contains("x=\"20\" y=\"20\" width=\"10\" height=\"10\""));
    }
}
