//! # Building Codes
//!
//! Static building-code data and the room classification used to select
//! rules from it.
//!
//! - [`registry`] - versioned rule tables keyed by country and code id
//! - [`room_type`] - ordered room-type inference from room names

pub mod registry;
pub mod room_type;

pub use registry::{
    available_codes, registry, AccessibilityRules, CodeRegistry, CodeSummary, MinimumRule, RuleTable,
};
pub use room_type::RoomType;
