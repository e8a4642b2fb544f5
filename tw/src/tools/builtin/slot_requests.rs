//! Slot-request tool definitions
//!
//! These two tools are declared in the per-turn catalog but never
//! dispatched: a proposed call is the engine's cue to stop the turn and
//! hand the question back to the traveller's UI.

use serde_json::json;

use crate::llm::ToolDefinition;
use crate::slots::SlotKind;

/// Catalog name for the travel-dates request
pub const REQUEST_DATES: &str = "request_dates";

/// Catalog name for the guest-count request
pub const REQUEST_GUESTS: &str = "request_guest_count";

/// Definition for the request tool matching a missing slot
pub fn slot_request_definition(kind: SlotKind) -> ToolDefinition {
    match kind {
        SlotKind::Dates => ToolDefinition::new(
            REQUEST_DATES,
            "Ask the traveller for their travel dates. Call this when the \
             destination is known but the dates are not.",
            json!({ "type": "object", "properties": {} }),
        ),
        SlotKind::Guests => ToolDefinition::new(
            REQUEST_GUESTS,
            "Ask the traveller how many people are going. Call this when the \
             destination and dates are known but the group size is not.",
            json!({ "type": "object", "properties": {} }),
        ),
    }
}

/// Map a proposed tool name back to the slot it requests
pub fn slot_kind_for(name: &str) -> Option<SlotKind> {
    match name {
        REQUEST_DATES => Some(SlotKind::Dates),
        REQUEST_GUESTS => Some(SlotKind::Guests),
        _ => None,
    }
}
