//! finalize_trip tool - the terminal call that delivers a plan

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::Plan;
use crate::tools::{Tool, ToolContext, ToolResult};

/// Name the orchestrator watches for to detect the terminal call
pub const FINALIZE_TRIP: &str = "finalize_trip";

/// Accept the drafted plan, repair it and attach a destination image
///
/// The engine treats a successful call to this tool as terminal: the
/// repaired plan in the result becomes the planReady payload.
pub struct FinalizeTripTool;

#[async_trait]
impl Tool for FinalizeTripTool {
    fn name(&self) -> &'static str {
        FINALIZE_TRIP
    }

    fn description(&self) -> &'static str {
        "Deliver the finished trip plan to the traveller. Call exactly once, \
         after fares and lodging have been gathered, with the complete plan."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Destination city"
                },
                "country": {
                    "type": "string",
                    "description": "Country the destination is in"
                },
                "dateRange": {
                    "type": "string",
                    "description": "Travel dates, e.g. '2025-09-01 to 2025-09-05'"
                },
                "description": {
                    "type": "string",
                    "description": "Two or three sentences selling the trip"
                },
                "price": {
                    "type": "number",
                    "description": "Total trip price; recomputed from the cost breakdown"
                },
                "weather": {
                    "type": "object",
                    "properties": {
                        "icon": {
                            "type": "string",
                            "enum": ["sunny", "partly-cloudy", "cloudy", "rainy", "stormy", "snowy"]
                        },
                        "summary": { "type": "string" }
                    }
                },
                "itinerary": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "date": { "type": "string", "description": "YYYY-MM-DD" },
                            "title": { "type": "string" },
                            "description": { "type": "string" }
                        }
                    }
                },
                "costBreakdown": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "label": { "type": "string" },
                            "price": { "type": "number" }
                        }
                    }
                }
            },
            "required": ["location", "description", "itinerary", "costBreakdown"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let mut plan: Plan = match serde_json::from_value(input) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(request_id = %ctx.request_id, error = %e, "finalize_trip: plan did not parse");
                return ToolResult::error(format!("plan does not match the expected shape: {e}"));
            }
        };

        plan.normalize();
        plan.image = ctx.images.resolve(&plan.location).await;

        debug!(
            request_id = %ctx.request_id,
            location = %plan.location,
            price = plan.price,
            days = plan.itinerary.len(),
            "finalize_trip: plan ready"
        );

        match serde_json::to_value(&plan) {
            Ok(value) => ToolResult::success(value),
            Err(e) => ToolResult::error(format!("plan serialization failed: {e}")),
        }
    }
}
