//! Flight lookup capability and the deterministic default catalog

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use tracing::debug;

use super::{seed, TravelError};

/// One fare option for a route
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FareSummary {
    pub carrier: String,
    pub origin: String,
    pub destination: String,
    pub price: f64,
    pub stops: u8,
}

/// Capability interface for the external flight service
#[async_trait]
pub trait FlightSearch: Send + Sync {
    /// Return fare options for a route over a date range
    async fn search(&self, origin: &str, destination: &str, date_range: &str) -> Result<Vec<FareSummary>, TravelError>;
}

/// Deterministic sample catalog quoting a fixed carrier roster
///
/// Quotes are resolved per carrier concurrently and joined; ordering across
/// the fan-out is unspecified and nothing downstream may rely on it.
pub struct StaticFlightCatalog {
    carriers: Vec<String>,
}

impl StaticFlightCatalog {
    pub fn new(carriers: Vec<String>) -> Self {
        Self { carriers }
    }

    async fn quote(&self, carrier: &str, origin: &str, destination: &str, date_range: &str) -> FareSummary {
        let h = seed(&[carrier, origin, destination, date_range]);
        FareSummary {
            carrier: carrier.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            price: 90.0 + (h % 72_000) as f64 / 100.0,
            stops: (h % 3) as u8,
        }
    }
}

impl Default for StaticFlightCatalog {
    fn default() -> Self {
        Self::new(vec![
            "Aerolane".to_string(),
            "Nordwind".to_string(),
            "Meridian Air".to_string(),
            "Pacific Sky".to_string(),
        ])
    }
}

#[async_trait]
impl FlightSearch for StaticFlightCatalog {
    async fn search(&self, origin: &str, destination: &str, date_range: &str) -> Result<Vec<FareSummary>, TravelError> {
        debug!(%origin, %destination, %date_range, "StaticFlightCatalog::search: called");

        let quotes = self
            .carriers
            .iter()
            .map(|carrier| self.quote(carrier, origin, destination, date_range));

        Ok(join_all(quotes).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_quotes_every_carrier() {
        let catalog = StaticFlightCatalog::default();
        let fares = catalog.search("London", "Rome", "2025-09-01 to 2025-09-05").await.unwrap();

        assert_eq!(fares.len(), 4);
        for fare in &fares {
            assert!(fare.price >= 90.0);
            assert!(fare.stops <= 2);
            assert_eq!(fare.destination, "Rome");
        }
    }

    #[tokio::test]
    async fn test_quotes_are_deterministic() {
        let catalog = StaticFlightCatalog::default();
        let first = catalog.search("London", "Rome", "2025-09-01").await.unwrap();
        let second = catalog.search("London", "Rome", "2025-09-01").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_different_routes_quote_differently() {
        let catalog = StaticFlightCatalog::default();
        let rome = catalog.search("London", "Rome", "2025-09-01").await.unwrap();
        let tokyo = catalog.search("London", "Tokyo", "2025-09-01").await.unwrap();

        assert_ne!(rome, tokyo);
    }
}
