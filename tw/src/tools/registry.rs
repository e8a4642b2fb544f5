//! ToolRegistry - maps tool names to schema-described handlers

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::llm::{ToolCall, ToolDefinition};

use super::builtin::{FinalizeTripTool, FlightSearchTool, HotelSearchTool};
use super::{Tool, ToolContext, ToolResult};

/// Registry of dispatchable tool handlers
///
/// At most one handler per name. Proposed calls for unregistered names are
/// logged and answered with an error result; malformed arguments are
/// tolerated as `{}` (logged) so a sloppy proposal degrades instead of
/// breaking the turn.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry with the standard planning tools
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(FlightSearchTool);
        registry.register(HotelSearchTool);
        registry.register(FinalizeTripTool);
        registry
    }

    /// An empty registry
    pub fn empty() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Add a handler; a later registration for the same name replaces it
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Definitions for the full catalog
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Definitions for a subset of tools by name
    pub fn definitions_for(&self, tool_names: &[&str]) -> Vec<ToolDefinition> {
        tool_names
            .iter()
            .filter_map(|name| self.tools.get(*name))
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Check if a handler is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Dispatch one proposed call
    pub async fn dispatch(&self, call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        let Some(tool) = self.tools.get(&call.name) else {
            warn!(request_id = %ctx.request_id, name = %call.name, "dispatch: unknown tool proposed");
            return ToolResult::error(format!("Unknown tool: {}", call.name));
        };

        let input = coerce_arguments(&call.input, &ctx.request_id);
        tool.execute(input, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Coerce proposed arguments to a JSON object, defaulting to `{}`
///
/// Arguments may arrive as an object, as a string of JSON, or as garbage;
/// only the first two are usable.
fn coerce_arguments(input: &Value, request_id: &str) -> Value {
    match input {
        Value::Object(_) => input.clone(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Value::Object(map),
            _ => {
                debug!(%request_id, "coerce_arguments: unparseable string arguments, defaulting to {{}}");
                Value::Object(Map::new())
            }
        },
        _ => {
            debug!(%request_id, "coerce_arguments: non-object arguments, defaulting to {{}}");
            Value::Object(Map::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::context::testing::offline_context;
    use super::*;

    #[test]
    fn test_standard_registry_has_planning_tools() {
        let registry = ToolRegistry::default();

        assert!(registry.has_tool("search_flights"));
        assert!(registry.has_tool("search_hotels"));
        assert!(registry.has_tool("finalize_trip"));
    }

    #[test]
    fn test_definitions_for_subset() {
        let registry = ToolRegistry::default();
        let defs = registry.definitions_for(&["search_flights", "search_hotels"]);

        assert_eq!(defs.len(), 2);
        assert!(defs.iter().any(|d| d.name == "search_flights"));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_is_an_error_result() {
        let registry = ToolRegistry::default();
        let ctx = offline_context();

        let call = ToolCall::new("call_1", "book_rocket", json!({}));
        let result = registry.dispatch(&call, &ctx).await;

        assert!(result.is_error);
        assert!(result.content_text().contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_dispatch_tolerates_malformed_arguments() {
        let registry = ToolRegistry::default();
        let ctx = offline_context();

        // Garbage arguments coerce to {} and the handler reports what's missing
        let call = ToolCall::new("call_2", "search_hotels", json!(42));
        let result = registry.dispatch(&call, &ctx).await;

        assert!(result.is_error);
        assert!(result.content_text().contains("location"));
    }

    #[test]
    fn test_coerce_arguments_accepts_json_strings() {
        let input = json!(r#"{"location":"Rome"}"#);
        let coerced = coerce_arguments(&input, "req-test");
        assert_eq!(coerced["location"], "Rome");
    }
}
