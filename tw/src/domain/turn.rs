//! Incoming transcript records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One message-like record from the caller's transcript
///
/// Records arrive in whatever shape the UI accumulated them: roles may be
/// unknown strings, content may be missing when a structured payload (a
/// previously delivered plan) stands in for it, and hidden bookkeeping
/// entries may be interleaved. The transcript normalizer turns these into a
/// canonical message sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnRecord {
    /// Sender role; anything but user/assistant/tool/system is coerced to user
    pub role: String,
    pub content: Option<String>,
    /// Correlates a tool record back to the tool call it answers
    pub tool_call_id: Option<String>,
    /// Hidden records are dropped during normalization
    pub hidden: bool,
    /// Structured payload (a prior plan) kept alongside or instead of text
    pub payload: Option<Value>,
}

impl TurnRecord {
    /// Build a plain user record
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(text.into()),
            ..Self::default()
        }
    }

    /// Build a plain assistant record
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(text.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let record: TurnRecord = serde_json::from_str(r#"{"role":"user","content":"hi"}"#).unwrap();
        assert_eq!(record.role, "user");
        assert_eq!(record.content.as_deref(), Some("hi"));
        assert!(!record.hidden);
        assert!(record.tool_call_id.is_none());
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let record: TurnRecord = serde_json::from_str("{}").unwrap();
        assert!(record.role.is_empty());
        assert!(record.content.is_none());
    }

    #[test]
    fn test_tool_call_id_is_camel_case_on_the_wire() {
        let record: TurnRecord =
            serde_json::from_str(r#"{"role":"tool","content":"{}","toolCallId":"call_7"}"#).unwrap();
        assert_eq!(record.tool_call_id.as_deref(), Some("call_7"));
    }
}
