//! ToolContext - execution context for tool handlers

use std::sync::Arc;

use crate::photos::ImageResolver;
use crate::travel::{FlightSearch, HotelSearch};

/// Collaborator handles and identifiers scoped to one request
///
/// Handlers receive this instead of reaching for globals, so tests can swap
/// any collaborator for a scripted one.
#[derive(Clone)]
pub struct ToolContext {
    /// Correlation id for this request's log lines
    pub request_id: String,

    /// Stable user id ("anonymous" when the request carried none)
    pub user_id: String,

    pub flights: Arc<dyn FlightSearch>,
    pub hotels: Arc<dyn HotelSearch>,
    pub images: Arc<ImageResolver>,
}

impl ToolContext {
    /// Create a context for one request
    pub fn new(
        request_id: String,
        user_id: String,
        flights: Arc<dyn FlightSearch>,
        hotels: Arc<dyn HotelSearch>,
        images: Arc<ImageResolver>,
    ) -> Self {
        Self {
            request_id,
            user_id,
            flights,
            hotels,
            images,
        }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("request_id", &self.request_id)
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixture for tool and engine tests

    use super::*;
    use crate::travel::{StaticFlightCatalog, StaticHotelCatalog};

    /// A context wired to the deterministic catalogs and an offline resolver
    pub(crate) fn offline_context() -> ToolContext {
        ToolContext::new(
            "req-test".to_string(),
            "user-test".to_string(),
            Arc::new(StaticFlightCatalog::default()),
            Arc::new(StaticHotelCatalog),
            Arc::new(ImageResolver::offline("https://images.example.com/fallback.jpg")),
        )
    }
}
