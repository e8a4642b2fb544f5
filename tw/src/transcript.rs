//! Transcript normalizer
//!
//! Converts the heterogeneous message records a UI accumulates into the
//! canonical message sequence the reasoning engine consumes. Normalization
//! never fails: hidden records are dropped, unknown roles are coerced to
//! user, and records whose text is missing but which carry a structured
//! payload (a previously delivered plan) get a short synthesized summary so
//! cross-turn memory survives without replaying the full structure.

use serde_json::Value;
use tracing::debug;

use crate::domain::TurnRecord;
use crate::llm::{ContentBlock, Message};

/// Sentinel marking a previously delivered plan in the transcript
///
/// The slot gate only scans records after the most recent marker, so a
/// delivered plan resets slot memory for follow-up requests.
pub const SNAPSHOT_MARKER: &str = "[[plan-snapshot]]";

/// Normalize raw records into the canonical message sequence
pub fn normalize(records: &[TurnRecord]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(records.len());

    for record in records {
        if record.hidden {
            continue;
        }

        let text = match (&record.content, &record.payload) {
            (Some(content), _) => content.clone(),
            (None, Some(payload)) => synthesize_payload_summary(payload),
            (None, None) => {
                debug!(role = %record.role, "normalize: record with no content or payload, dropping");
                continue;
            }
        };

        match record.role.as_str() {
            "assistant" => messages.push(Message::assistant(text)),
            "tool" => {
                let call_id = record.tool_call_id.clone().unwrap_or_default();
                messages.push(Message::user_blocks(vec![ContentBlock::tool_result(call_id, text, false)]));
            }
            // System instructions are rebuilt per turn; inline ones ride
            // along as user context. Unrecognized roles coerce to user.
            _ => messages.push(Message::user(text)),
        }
    }

    messages
}

/// Concatenated user text after the most recent plan snapshot
///
/// This is the suffix the slot gate derives its readiness flags from. A
/// record counts as a snapshot when its text carries the marker or when it
/// is a payload-only record (its synthesized summary carries the marker).
pub fn user_text_since_snapshot(records: &[TurnRecord]) -> String {
    let start = records
        .iter()
        .rposition(is_snapshot)
        .map(|index| index + 1)
        .unwrap_or(0);

    records[start..]
        .iter()
        .filter(|record| !record.hidden && record.role == "user")
        .filter_map(|record| record.content.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// All user text in the transcript, snapshot markers ignored
///
/// The profile extractor works on the cumulative text: preferences expressed
/// before a delivered plan still hold for the next trip.
pub fn cumulative_user_text(records: &[TurnRecord]) -> String {
    records
        .iter()
        .filter(|record| !record.hidden && record.role == "user")
        .filter_map(|record| record.content.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_snapshot(record: &TurnRecord) -> bool {
    match &record.content {
        Some(content) => content.contains(SNAPSHOT_MARKER),
        None => record.payload.is_some(),
    }
}

fn synthesize_payload_summary(payload: &Value) -> String {
    match payload.get("location").and_then(Value::as_str) {
        Some(location) => format!("{SNAPSHOT_MARKER} A trip plan for {location} was already delivered above."),
        None => format!("{SNAPSHOT_MARKER} A trip plan was already delivered above."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MessageContent, Role};

    fn tool_record(call_id: &str, content: &str) -> TurnRecord {
        TurnRecord {
            role: "tool".to_string(),
            content: Some(content.to_string()),
            tool_call_id: Some(call_id.to_string()),
            ..TurnRecord::default()
        }
    }

    #[test]
    fn test_normalize_drops_hidden_records() {
        let records = vec![
            TurnRecord::user("Take me to Lisbon"),
            TurnRecord {
                hidden: true,
                ..TurnRecord::user("internal bookkeeping")
            },
        ];

        let messages = normalize(&records);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_normalize_coerces_unknown_roles_to_user() {
        let records = vec![TurnRecord {
            role: "moderator".to_string(),
            content: Some("welcome".to_string()),
            ..TurnRecord::default()
        }];

        let messages = normalize(&records);
        assert_eq!(messages[0].role, Role::User);
    }

    #[test]
    fn test_normalize_keeps_tool_call_id() {
        let messages = normalize(&[tool_record("call_3", r#"{"fares":[]}"#)]);

        match &messages[0].content {
            MessageContent::Blocks(blocks) => match &blocks[0] {
                ContentBlock::ToolResult { tool_use_id, .. } => assert_eq!(tool_use_id, "call_3"),
                other => panic!("expected tool result block, got {other:?}"),
            },
            other => panic!("expected blocks, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_synthesizes_payload_summary() {
        let records = vec![TurnRecord {
            role: "assistant".to_string(),
            content: None,
            payload: Some(serde_json::json!({ "location": "Kyoto" })),
            ..TurnRecord::default()
        }];

        let messages = normalize(&records);
        let text = match &messages[0].content {
            MessageContent::Text(text) => text,
            other => panic!("expected text, got {other:?}"),
        };
        assert!(text.contains("Kyoto"));
        assert!(text.contains(SNAPSHOT_MARKER));
    }

    #[test]
    fn test_normalize_never_fails_on_empty_records() {
        let messages = normalize(&[TurnRecord::default()]);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_user_text_since_snapshot_resets_at_marker() {
        let records = vec![
            TurnRecord::user("I want to go to Paris in June"),
            TurnRecord {
                role: "assistant".to_string(),
                content: None,
                payload: Some(serde_json::json!({ "location": "Paris" })),
                ..TurnRecord::default()
            },
            TurnRecord::user("now somewhere warm instead"),
        ];

        let suffix = user_text_since_snapshot(&records);
        assert_eq!(suffix, "now somewhere warm instead");

        let cumulative = cumulative_user_text(&records);
        assert!(cumulative.contains("Paris"));
        assert!(cumulative.contains("somewhere warm"));
    }

    #[test]
    fn test_user_text_without_snapshot_covers_everything() {
        let records = vec![TurnRecord::user("Rome"), TurnRecord::user("two adults")];
        assert_eq!(user_text_since_snapshot(&records), "Rome\ntwo adults");
    }
}
