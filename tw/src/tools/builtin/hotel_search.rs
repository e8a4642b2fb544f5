//! search_hotels tool - property lookup via the lodging capability

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult};

/// Look up lodging options in a location
pub struct HotelSearchTool;

#[async_trait]
impl Tool for HotelSearchTool {
    fn name(&self) -> &'static str {
        "search_hotels"
    }

    fn description(&self) -> &'static str {
        "Search hotels in a location. Returns name, nightly rate and rating per property."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or area to search in"
                },
                "date_range": {
                    "type": "string",
                    "description": "Stay dates, e.g. '2025-09-01 to 2025-09-05'"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(location) = input.get("location").and_then(Value::as_str) else {
            return ToolResult::error("location is required");
        };

        let date_range = input.get("date_range").and_then(Value::as_str).unwrap_or_default();

        debug!(request_id = %ctx.request_id, %location, "search_hotels: looking up properties");

        match ctx.hotels.search(location, date_range).await {
            Ok(properties) => ToolResult::success(json!({ "properties": properties })),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::context::testing::offline_context;

    #[tokio::test]
    async fn test_returns_properties_for_location() {
        let ctx = offline_context();
        let tool = HotelSearchTool;

        let result = tool.execute(json!({ "location": "Lisbon" }), &ctx).await;

        assert!(!result.is_error);
        let properties = result.content["properties"].as_array().unwrap();
        assert!(!properties.is_empty());
        assert!(properties[0]["name"].as_str().unwrap().contains("Lisbon"));
    }

    #[tokio::test]
    async fn test_missing_location_is_an_error_result() {
        let ctx = offline_context();
        let tool = HotelSearchTool;

        let result = tool.execute(json!({}), &ctx).await;

        assert!(result.is_error);
        assert!(result.content_text().contains("location"));
    }
}
