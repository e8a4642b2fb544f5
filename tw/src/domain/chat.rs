//! Transport request/response shapes

use serde::{Deserialize, Serialize};

use super::plan::Plan;
use super::turn::TurnRecord;

/// One planning request: the accumulated transcript plus an optional user id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatRequest {
    pub messages: Vec<TurnRecord>,
    pub user_id: Option<String>,
}

/// Side-channel signal accompanying a reply
///
/// Exactly one of the missing-slot signals or the terminal plan signal is
/// ever attached to a single response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Signal {
    #[serde(rename = "dateNeeded")]
    DateNeeded,
    #[serde(rename = "guestsNeeded")]
    GuestsNeeded,
    #[serde(rename = "planReady")]
    PlanReady { payload: Plan },
}

/// The engine's reply - always well-formed, never an error shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub ai_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<Signal>,
}

impl ChatResponse {
    /// A plain text reply with no signal
    pub fn text(ai_text: impl Into<String>) -> Self {
        Self {
            ai_text: ai_text.into(),
            signal: None,
        }
    }

    /// A reply carrying a signal
    pub fn with_signal(ai_text: impl Into<String>, signal: Signal) -> Self {
        Self {
            ai_text: ai_text.into(),
            signal: Some(signal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response_omits_signal() {
        let response = ChatResponse::text("Where would you like to go?");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["aiText"], "Where would you like to go?");
        assert!(value.get("signal").is_none());
    }

    #[test]
    fn test_signal_is_tagged_by_type() {
        let response = ChatResponse::with_signal("When are you travelling?", Signal::DateNeeded);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["signal"]["type"], "dateNeeded");
    }

    #[test]
    fn test_plan_ready_carries_payload() {
        let plan = Plan {
            location: "Rome".to_string(),
            ..Plan::default()
        };
        let response = ChatResponse::with_signal("Here is your trip!", Signal::PlanReady { payload: plan });
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["signal"]["type"], "planReady");
        assert_eq!(value["signal"]["payload"]["location"], "Rome");
    }
}
