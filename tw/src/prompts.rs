//! System-prompt assembly and the canned fallback texts
//!
//! The system prompt is rebuilt from scratch every request: base persona,
//! the traveller's accumulated preference profile, and the current slot
//! status with the matching gate instruction.

use crate::profile::UserProfile;
use crate::slots::{SlotKind, SlotState};

/// Shown when the reasoning engine cannot be reached this turn
pub const OFFLINE_MESSAGE: &str =
    "I'm having trouble reaching my planning engine right now. Please try again in a moment.";

/// Shown when the turn bound is exhausted without a terminal outcome
pub const SOFT_FAILURE_MESSAGE: &str =
    "I couldn't finish putting your trip together this time. Could you ask me again?";

/// Shown when the engine returns neither text nor tool calls
pub const REPROMPT_MESSAGE: &str = "Could you tell me a bit more about the trip you have in mind?";

/// Default text accompanying a delivered plan when the model sent none
pub const PLAN_READY_MESSAGE: &str = "Here's the trip I put together for you!";

/// Text accompanying a missing-slot signal
pub fn slot_request_text(kind: SlotKind) -> &'static str {
    match kind {
        SlotKind::Dates => "When are you planning to travel?",
        SlotKind::Guests => "How many people are going?",
    }
}

const BASE_PERSONA: &str = "You are a friendly travel-planning assistant. You help the traveller shape \
one trip at a time: where, when, and with whom, then fares, lodging and a day-by-day itinerary. \
Keep replies short and concrete. Use the available tools to look up real options instead of inventing \
prices. Never mention tools, systems or internal state to the traveller.";

/// Build the system prompt for one turn
pub fn system_prompt(profile: &UserProfile, slots: &SlotState) -> String {
    let mut prompt = String::from(BASE_PERSONA);

    if let Some(summary) = profile.summary() {
        prompt.push_str("\n\nWhat you know about this traveller: ");
        prompt.push_str(&summary);
        prompt.push('.');
    }

    prompt.push_str("\n\nCurrent trip status: ");
    match &slots.destination {
        Some(destination) => {
            prompt.push_str(&format!(
                "destination {destination}; dates {}; group size {}.",
                known(slots.dates_known),
                known(slots.guests_known)
            ));
        }
        None => prompt.push_str("no destination yet."),
    }

    prompt.push_str("\n\n");
    match slots.gate() {
        Some(SlotKind::Dates) => prompt.push_str(
            "The travel dates are missing. Call the request_dates tool now instead of asking in prose.",
        ),
        Some(SlotKind::Guests) => prompt.push_str(
            "The group size is missing. Call the request_guest_count tool now instead of asking in prose.",
        ),
        None if slots.ready_for_plan() => prompt.push_str(
            "Destination, dates and group size are all known. Look up fares and lodging, then deliver \
             the finished plan with the finalize_trip tool. Do not describe the plan in prose.",
        ),
        None => prompt.push_str("No destination is known yet. Ask the traveller where they would like to go."),
    }

    prompt
}

fn known(flag: bool) -> &'static str {
    if flag { "known" } else { "unknown" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_destination_asks_where() {
        let prompt = system_prompt(&UserProfile::default(), &SlotState::default());
        assert!(prompt.contains("no destination yet"));
        assert!(prompt.contains("where they would like to go"));
    }

    #[test]
    fn test_prompt_directs_to_missing_slot_tool() {
        let slots = SlotState {
            destination: Some("Rome".to_string()),
            dates_known: false,
            guests_known: false,
        };
        let prompt = system_prompt(&UserProfile::default(), &slots);
        assert!(prompt.contains("request_dates"));
        assert!(!prompt.contains("request_guest_count"));
    }

    #[test]
    fn test_prompt_directs_to_finalizer_when_ready() {
        let slots = SlotState {
            destination: Some("Rome".to_string()),
            dates_known: true,
            guests_known: true,
        };
        let prompt = system_prompt(&UserProfile::default(), &slots);
        assert!(prompt.contains("finalize_trip"));
    }

    #[test]
    fn test_prompt_embeds_profile_summary() {
        let mut profile = UserProfile::default();
        profile.absorb("honeymoon, we love diving");

        let prompt = system_prompt(&profile, &SlotState::default());
        assert!(prompt.contains("romantic"));
        assert!(prompt.contains("diving"));
    }
}
