//! Terminal plan payload and its normalization rules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weather icons the UI knows how to render
///
/// Anything else coming back from the model is clamped to the first entry.
pub const ALLOWED_WEATHER_ICONS: [&str; 6] = ["sunny", "partly-cloudy", "cloudy", "rainy", "stormy", "snowy"];

/// Tolerance for the price / cost-breakdown consistency invariant
pub const PRICE_TOLERANCE: f64 = 0.01;

/// Weather summary attached to a plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Weather {
    /// One of [`ALLOWED_WEATHER_ICONS`] after normalization
    pub icon: String,
    /// Short human-readable summary ("Warm and dry")
    pub summary: String,
}

/// One day of the itinerary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ItineraryDay {
    /// ISO date (YYYY-MM-DD) when known
    pub date: String,
    pub title: String,
    pub description: String,
}

/// One line of the cost breakdown
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CostLine {
    pub label: String,
    pub price: f64,
}

/// The structured travel plan produced by the terminal finalizer
///
/// Invariants after [`Plan::normalize`]:
/// - `price` equals the sum of `cost_breakdown[].price` (within
///   [`PRICE_TOLERANCE`])
/// - `itinerary` is in chronological order
/// - `weather.icon` is one of [`ALLOWED_WEATHER_ICONS`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Plan {
    pub location: String,
    pub country: String,
    pub date_range: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub weather: Weather,
    pub itinerary: Vec<ItineraryDay>,
    pub cost_breakdown: Vec<CostLine>,
}

impl Plan {
    /// Enforce the plan invariants in place
    ///
    /// The model's proposed `price` is discarded and recomputed from the cost
    /// lines, the itinerary is sorted by date (unparseable dates keep their
    /// relative order at the end), and the weather icon is clamped.
    pub fn normalize(&mut self) {
        debug!(location = %self.location, "Plan::normalize: called");

        self.price = (self.cost_breakdown.iter().map(|line| line.price).sum::<f64>() * 100.0).round() / 100.0;

        self.itinerary.sort_by(|a, b| match (parse_day(&a.date), parse_day(&b.date)) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        if !ALLOWED_WEATHER_ICONS.contains(&self.weather.icon.as_str()) {
            debug!(icon = %self.weather.icon, "Plan::normalize: unknown weather icon, clamping");
            self.weather.icon = ALLOWED_WEATHER_ICONS[0].to_string();
        }
    }

    /// Check the price / cost-breakdown invariant
    pub fn price_consistent(&self) -> bool {
        let total: f64 = self.cost_breakdown.iter().map(|line| line.price).sum();
        (self.price - total).abs() <= PRICE_TOLERANCE
    }
}

fn parse_day(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}
