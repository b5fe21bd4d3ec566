//! # Layout Data Structures
//!
//! `LayoutData` is the immutable input to every component of the pipeline:
//! an ordered list of rectangular rooms plus the circulation paths that
//! connect them.
//!
//! ## Structure
//!
//! ```text
//! LayoutData
//! ├── rooms: Vec<Room>                 (id, name, area, x, y, width, height)
//! └── circulation: Vec<CirculationPath> (from, to, width)
//! ```
//!
//! Layouts arrive from an external generator or from interactive editing,
//! so they may be transiently inconsistent. A circulation path whose `from`
//! or `to` names no room is tolerated everywhere: [`LayoutData::resolve`]
//! returns `None` for it and callers skip it.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "rooms": [
//!     { "id": "r1", "name": "Office", "area": 120, "x": 0, "y": 0, "width": 10, "height": 12 },
//!     { "id": "r2", "name": "Kitchen", "area": 100, "x": 10, "y": 0, "width": 10, "height": 10 }
//!   ],
//!   "circulation": [
//!     { "from": "r1", "to": "r2", "width": 4 }
//!   ]
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};

/// A rectangular room.
///
/// `area` is advisory and is not required to equal `width * height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Identifier, unique within a layout
    pub id: String,

    /// Free-text name (drives room-type inference)
    pub name: String,

    /// Floor area in square feet
    pub area: f64,

    /// Top-left corner, building-local units
    pub x: f64,
    pub y: f64,

    pub width: f64,
    pub height: f64,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        area: f64,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Room {
            id: id.into(),
            name: name.into(),
            area,
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge coordinate (`x + width`)
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge coordinate (`y + height`)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the room rectangle
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A corridor or doorway connecting two rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirculationPath {
    /// Room id the path starts at
    pub from: String,

    /// Room id the path ends at
    pub to: String,

    /// Clear width in feet
    pub width: f64,
}

impl CirculationPath {
    pub fn new(from: impl Into<String>, to: impl Into<String>, width: f64) -> Self {
        CirculationPath {
            from: from.into(),
            to: to.into(),
            width,
        }
    }

    /// Whether this path touches the given room
    pub fn touches(&self, room_id: &str) -> bool {
        self.from == room_id || self.to == room_id
    }

    /// Human-readable location string used in issue records
    pub fn describe(&self) -> String {
        format!("{} -> {}", self.from, self.to)
    }
}

/// Rooms plus circulation. Never mutated in place by this crate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutData {
    #[serde(default)]
    pub rooms: Vec<Room>,

    #[serde(default)]
    pub circulation: Vec<CirculationPath>,
}

impl LayoutData {
    pub fn new(rooms: Vec<Room>, circulation: Vec<CirculationPath>) -> Self {
        LayoutData { rooms, circulation }
    }

    /// Layout with no rooms, the generator's fallback value
    pub fn empty() -> Self {
        LayoutData::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Look up a room by id (first match wins on duplicate ids)
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Resolve both endpoints of a circulation path.
    ///
    /// Returns `None` if either endpoint names no room in this layout.
    pub fn resolve(&self, path: &CirculationPath) -> Option<(&Room, &Room)> {
        Some((self.room(&path.from)?, self.room(&path.to)?))
    }

    /// Sum of the advisory `area` fields
    pub fn total_area(&self) -> f64 {
        self.rooms.iter().map(|r| r.area).sum()
    }

    /// Return a copy with every room scaled by `multiplier`.
    ///
    /// Positions and dimensions scale linearly and `area` by the square, so
    /// rooms that touched before still touch afterwards. Circulation widths
    /// are left alone.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plan_core::layout::{LayoutData, Room};
    ///
    /// let layout = LayoutData::new(vec![Room::new("r1", "Office", 100.0, 0.0, 0.0, 10.0, 10.0)], vec![]);
    /// let bigger = layout.scaled(1.5).unwrap();
    /// assert_eq!(bigger.rooms[0].width, 15.0);
    /// assert_eq!(bigger.rooms[0].area, 225.0);
    /// assert_eq!(layout.rooms[0].width, 10.0);
    /// ```
    pub fn scaled(&self, multiplier: f64) -> PlanResult<LayoutData> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(PlanError::invalid_input(
                "multiplier",
                multiplier.to_string(),
                "Multiplier must be a positive finite number",
            ));
        }

        let rooms = self
            .rooms
            .iter()
            .map(|r| Room {
                id: r.id.clone(),
                name: r.name.clone(),
                area: r.area * multiplier * multiplier,
                x: r.x * multiplier,
                y: r.y * multiplier,
                width: r.width * multiplier,
                height: r.height * multiplier,
            })
            .collect();

        Ok(LayoutData {
            rooms,
            circulation: self.circulation.clone(),
        })
    }

    /// Collect non-fatal diagnostics about the layout.
    ///
    /// None of these stop the pipeline; they exist so a front end can tell
    /// the user what will be skipped or may be misleading.
    pub fn validate(&self) -> Vec<LayoutWarning> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for room in &self.rooms {
            if !seen.insert(room.id.as_str()) {
                warnings.push(LayoutWarning::DuplicateRoomId {
                    room_id: room.id.clone(),
                });
            }
            if room.width <= 0.0 || room.height <= 0.0 || room.area <= 0.0 {
                warnings.push(LayoutWarning::NonPositiveDimension {
                    room_id: room.id.clone(),
                });
            }
            let drawn = room.width * room.height;
            if drawn > 0.0 && room.area > 0.0 && (room.area - drawn).abs() / drawn > AREA_MISMATCH_TOLERANCE {
                warnings.push(LayoutWarning::AreaMismatch {
                    room_id: room.id.clone(),
                    stated: room.area,
                    drawn,
                });
            }
        }

        for path in &self.circulation {
            for endpoint in [&path.from, &path.to] {
                if self.room(endpoint).is_none() {
                    warnings.push(LayoutWarning::DanglingPath {
                        path: path.describe(),
                        missing_room: endpoint.clone(),
                    });
                }
            }
            if path.width <= 0.0 {
                warnings.push(LayoutWarning::NonPositivePathWidth {
                    path: path.describe(),
                });
            }
        }

        warnings
    }
}

/// Relative difference between stated and drawn area that triggers a warning
const AREA_MISMATCH_TOLERANCE: f64 = 0.10;

/// A non-fatal layout diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    DuplicateRoomId { room_id: String },
    NonPositiveDimension { room_id: String },
    AreaMismatch { room_id: String, stated: f64, drawn: f64 },
    DanglingPath { path: String, missing_room: String },
    NonPositivePathWidth { path: String },
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutWarning::DuplicateRoomId { room_id } => write!(f, "duplicate room id '{}'", room_id),
            LayoutWarning::NonPositiveDimension { room_id } => {
                write!(f, "room '{}' has a non-positive dimension or area", room_id)
            }
            LayoutWarning::AreaMismatch { room_id, stated, drawn } => write!(
                f,
                "room '{}' states {:.0} sq ft but is drawn as {:.0}",
                room_id, stated, drawn
            ),
            LayoutWarning::DanglingPath { path, missing_room } => {
                write!(f, "path {} references missing room '{}' and will be skipped", path, missing_room)
            }
            LayoutWarning::NonPositivePathWidth { path } => write!(f, "path {} has a non-positive width", path),
        }
    }
}

/// A small two-bedroom-plus-office plan used by demos and tests.
pub fn sample_layout() -> LayoutData {
    LayoutData::new(
        vec![
            Room::new("living", "Living Room", 300.0, 0.0, 0.0, 20.0, 15.0),
            Room::new("kitchen", "Kitchen", 150.0, 20.0, 0.0, 10.0, 15.0),
            Room::new("bed1", "Primary Bedroom", 168.0, 0.0, 15.0, 14.0, 12.0),
            Room::new("bath", "Bathroom", 48.0, 14.0, 15.0, 6.0, 8.0),
            Room::new("office", "Home Office", 100.0, 20.0, 15.0, 10.0, 10.0),
        ],
        vec![
            CirculationPath::new("living", "kitchen", 4.0),
            CirculationPath::new("living", "bed1", 3.5),
            CirculationPath::new("living", "bath", 3.0),
            CirculationPath::new("kitchen", "office", 4.0),
        ],
    )
}
