//! Room-type inference from free-text room names.
//!
//! Classification is an ordered, case-insensitive substring match and the
//! first match wins:
//!
//! | Order | Substring(s)          | Type       |
//! |-------|-----------------------|------------|
//! | 1     | `office`              | Office     |
//! | 2     | `meeting`, `conference` | Meeting  |
//! | 3     | `restroom`, `bathroom`  | Restroom |
//! | 4     | `bedroom`             | Bedroom    |
//! | 5     | `kitchen`             | Kitchen    |
//! | 6     | `living`              | Living     |
//! | -     | anything else         | General    |
//!
//! Names often contain several keywords ("Office Kitchenette" is an office),
//! so the order is part of the behaviour. It is an imprecise heuristic; do
//! not reorder it without checking existing rule tables.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Office,
    Meeting,
    Restroom,
    Bedroom,
    Kitchen,
    Living,
    General,
}

/// Match table in priority order
const CLASSIFICATION_ORDER: [(&[&str], RoomType); 6] = [
    (&["office"], RoomType::Office),
    (&["meeting", "conference"], RoomType::Meeting),
    (&["restroom", "bathroom"], RoomType::Restroom),
    (&["bedroom"], RoomType::Bedroom),
    (&["kitchen"], RoomType::Kitchen),
    (&["living"], RoomType::Living),
];

impl RoomType {
    pub const ALL: [RoomType; 7] = [
        RoomType::Office,
        RoomType::Meeting,
        RoomType::Restroom,
        RoomType::Bedroom,
        RoomType::Kitchen,
        RoomType::Living,
        RoomType::General,
    ];

    /// Infer the room type from a room name
    pub fn classify(name: &str) -> RoomType {
        let lower = name.to_lowercase();
        CLASSIFICATION_ORDER
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
            .map(|(_, room_type)| *room_type)
            .unwrap_or(RoomType::General)
    }

    /// Key used for this type in rule-table `room_area` sections
    pub fn key(&self) -> &'static str {
        match self {
            RoomType::Office => "office",
            RoomType::Meeting => "meeting",
            RoomType::Restroom => "restroom",
            RoomType::Bedroom => "bedroom",
            RoomType::Kitchen => "kitchen",
            RoomType::Living => "living",
            RoomType::General => "general",
        }
    }

    /// Rooms that must fit a wheelchair turning circle
    pub fn needs_turning_space(&self) -> bool {
        matches!(self, RoomType::Restroom | RoomType::Office | RoomType::Meeting)
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_classification() {
        assert_eq!(RoomType::classify("Office"), RoomType::Office);
        assert_eq!(RoomType::classify("Conference Room B"), RoomType::Meeting);
        assert_eq!(RoomType::classify("Guest Bathroom"), RoomType::Restroom);
        assert_eq!(RoomType::classify("Master BEDROOM"), RoomType::Bedroom);
        assert_eq!(RoomType::classify("kitchen"), RoomType::Kitchen);
        assert_eq!(RoomType::classify("Living Room"), RoomType::Living);
        assert_eq!(RoomType::classify("Garage"), RoomType::General);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(RoomType::classify("Office Kitchenette"), RoomType::Office);
        assert_eq!(RoomType::classify("Meeting Kitchen"), RoomType::Meeting);
        assert_eq!(RoomType::classify("Bedroom with Bathroom"), RoomType::Restroom);
    }

    #[test]
    fn test_turning_space_types() {
        assert!(RoomType::Restroom.needs_turning_space());
        assert!(RoomType::Office.needs_turning_space());
        assert!(RoomType::Meeting.needs_turning_space());
        assert!(!RoomType::Bedroom.needs_turning_space());
        assert!(!RoomType::General.needs_turning_space());
    }

    #[test]
    fn test_key_matches_serde_name() {
        for room_type in RoomType::ALL {
            let json = serde_json::to_string(&room_type).unwrap();
            assert_eq!(json, format!("\"{}\"", room_type.key()));
        }
    }
}
