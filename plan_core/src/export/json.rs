//! JSON export envelope.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "exportedAt": "2024-05-17T12:00:00Z",
//!   "metadata": { "source": "generator" },
//!   "layout": { "rooms": [...], "circulation": [...] }
//! }
//! ```
//!
//! The `layout` field is an exact echo of the input, so
//! `import_json(encode(layout, ..))?.layout == layout`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::file_io::validate_version;
use crate::layout::LayoutData;

/// Envelope format version written by [`encode`]
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: String,
    pub exported_at: DateTime<Utc>,

    #[serde(default)]
    pub metadata: serde_json::Value,

    pub layout: LayoutData,
}

/// Pretty-printed envelope around `layout`.
pub fn encode(layout: &LayoutData, metadata: &serde_json::Value, exported_at: DateTime<Utc>) -> PlanResult<String> {
    let envelope = ExportEnvelope {
        version: EXPORT_FORMAT_VERSION.to_string(),
        exported_at,
        metadata: metadata.clone(),
        layout: layout.clone(),
    };
    serde_json::to_string_pretty(&envelope).map_err(|e| PlanError::export_failed("json", e.to_string()))
}

/// Parse an envelope, rejecting incompatible versions.
pub fn import_json(text: &str) -> PlanResult<ExportEnvelope> {
    let envelope: ExportEnvelope = serde_json::from_str(text)?;
    validate_version(&envelope.version, EXPORT_FORMAT_VERSION)?;
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{sample_layout, CirculationPath, Room};
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_layout_round_trips_exactly() {
        // dangling path and fractional values must survive untouched
        let mut layout = sample_layout();
        layout.rooms.push(Room::new("odd", "Nook", 12.345, 1.5, -2.25, 3.1, 4.2));
        layout.circulation.push(CirculationPath::new("odd", "missing", 2.75));

        let text = encode(&layout, &json!({ "source": "test" }), at()).unwrap();
        let back = import_json(&text).unwrap();

        assert_eq!(back.layout, layout);
        assert_eq!(back.version, "1.0");
        assert_eq!(back.metadata["source"], "test");
        assert_eq!(back.exported_at, at());
    }

    #[test]
    fn test_full_precision_floats_round_trip() {
        // xorshift64 so the values are reproducible and use every mantissa bit
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move |range: f64| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64 * range
        };

        let rooms: Vec<Room> = (0..5_000)
            .map(|i| {
                Room::new(
                    format!("r{}", i),
                    "Room",
                    next(500.0),
                    next(1_000.0) - 500.0,
                    next(1_000.0) - 500.0,
                    next(40.0),
                    next(40.0),
                )
            })
            .collect();
        let circulation = (1..rooms.len())
            .step_by(7)
            .map(|i| CirculationPath::new(format!("r{}", i - 1), format!("r{}", i), next(8.0)))
            .collect();
        let layout = LayoutData::new(rooms, circulation);

        let back = import_json(&encode(&layout, &json!({}), at()).unwrap()).unwrap();

        let mismatched = layout
            .rooms
            .iter()
            .zip(&back.layout.rooms)
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(mismatched, 0);
        assert_eq!(back.layout, layout);
    }

    #[test]
    fn test_wire_field_names() {
        let text = encode(&LayoutData::empty(), &json!({}), at()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["exportedAt"], "2024-05-17T12:00:00Z");
        assert!(value["layout"]["rooms"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_incompatible_version_is_rejected() {
        let text = r#"{ "version": "2.0", "exportedAt": "2024-05-17T12:00:00Z", "layout": {} }"#;
        let err = import_json(text).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_missing_metadata_defaults_to_null() {
        let text = r#"{ "version": "1.0", "exportedAt": "2024-05-17T12:00:00Z", "layout": { "rooms": [] } }"#;
        let envelope = import_json(text).unwrap();
        assert!(envelope.metadata.is_null());
        assert!(envelope.layout.is_empty());
    }
}
