//! Domain types for the trip-planning engine

mod chat;
mod plan;
mod turn;

pub use chat::{ChatRequest, ChatResponse, Signal};
pub use plan::{CostLine, ItineraryDay, Plan, Weather, ALLOWED_WEATHER_ICONS, PRICE_TOLERANCE};
pub use turn::TurnRecord;
