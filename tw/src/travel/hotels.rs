//! Hotel lookup capability and the deterministic default catalog

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{seed, TravelError};

/// One property option for a stay
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertySummary {
    pub name: String,
    pub location: String,
    pub nightly_rate: f64,
    pub rating: f64,
}

/// Capability interface for the external hotel service
#[async_trait]
pub trait HotelSearch: Send + Sync {
    /// Return property options for a location over a date range
    async fn search(&self, location: &str, date_range: &str) -> Result<Vec<PropertySummary>, TravelError>;
}

/// Deterministic sample catalog templating a few properties per location
pub struct StaticHotelCatalog;

const PROPERTY_TEMPLATES: [(&str, f64); 4] = [
    ("Grand {} Hotel", 4.6),
    ("{} Central Suites", 4.2),
    ("The {} Courtyard", 3.9),
    ("{} Harbour Inn", 3.5),
];

#[async_trait]
impl HotelSearch for StaticHotelCatalog {
    async fn search(&self, location: &str, date_range: &str) -> Result<Vec<PropertySummary>, TravelError> {
        debug!(%location, %date_range, "StaticHotelCatalog::search: called");

        let properties = PROPERTY_TEMPLATES
            .iter()
            .map(|(template, rating)| {
                let name = template.replace("{}", location);
                let h = seed(&[&name, date_range]);
                PropertySummary {
                    name,
                    location: location.to_string(),
                    nightly_rate: 60.0 + (h % 34_000) as f64 / 100.0,
                    rating: *rating,
                }
            })
            .collect();

        Ok(properties)
    }
}
