//! search_flights tool - fare lookup via the flight capability

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult};

/// Look up fare options for a route
pub struct FlightSearchTool;

#[async_trait]
impl Tool for FlightSearchTool {
    fn name(&self) -> &'static str {
        "search_flights"
    }

    fn description(&self) -> &'static str {
        "Search flight fares to a destination. Returns carrier, price and stop count per option."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "origin": {
                    "type": "string",
                    "description": "Departure city; omit if the traveller has not said"
                },
                "destination": {
                    "type": "string",
                    "description": "Destination city"
                },
                "date_range": {
                    "type": "string",
                    "description": "Travel dates, e.g. '2025-09-01 to 2025-09-05'"
                }
            },
            "required": ["destination"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(destination) = input.get("destination").and_then(Value::as_str) else {
            return ToolResult::error("destination is required");
        };

        let origin = input.get("origin").and_then(Value::as_str).unwrap_or("nearest hub");
        let date_range = input.get("date_range").and_then(Value::as_str).unwrap_or_default();

        debug!(request_id = %ctx.request_id, %origin, %destination, "search_flights: looking up fares");

        match ctx.flights.search(origin, destination, date_range).await {
            Ok(fares) => ToolResult::success(json!({ "fares": fares })),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::context::testing::offline_context;

    #[tokio::test]
    async fn test_returns_fares_for_destination() {
        let ctx = offline_context();
        let tool = FlightSearchTool;

        let result = tool
            .execute(json!({ "destination": "Rome", "date_range": "2025-09-01 to 2025-09-05" }), &ctx)
            .await;

        assert!(!result.is_error);
        assert!(result.content["fares"].as_array().is_some_and(|f| !f.is_empty()));
    }

    #[tokio::test]
    async fn test_missing_destination_is_an_error_result() {
        let ctx = offline_context();
        let tool = FlightSearchTool;

        let result = tool.execute(json!({}), &ctx).await;

        assert!(result.is_error);
        assert!(result.content_text().contains("destination"));
    }
}
