//! Tool trait definition

use async_trait::async_trait;
use serde_json::{json, Value};

use super::context::ToolContext;

/// A tool the reasoning engine can call
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the proposed tool_use name)
    fn name(&self) -> &'static str;

    /// Human-readable description for the tool catalog
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool; failures must come back as error results
    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult;
}

/// Result of a tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: Value,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result from any JSON value
    pub fn success(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an `{error}` result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: json!({ "error": message.into() }),
            is_error: true,
        }
    }

    /// Serialize the content for the tool_result message
    pub fn content_text(&self) -> String {
        self.content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success(json!({ "fares": [] }));
        assert!(!result.is_error);
        assert_eq!(result.content["fares"], json!([]));
    }

    #[test]
    fn test_tool_result_error_has_error_key() {
        let result = ToolResult::error("lookup unavailable");
        assert!(result.is_error);
        assert_eq!(result.content["error"], "lookup unavailable");
        assert!(result.content_text().contains("lookup unavailable"));
    }
}
