//! Flight and hotel lookup collaborators
//!
//! Capability traits for the external fare/property services plus
//! deterministic in-process catalogs used as defaults so the engine runs end
//! to end without external lookups. From the orchestrator's perspective every
//! lookup is optional: a failure becomes an `{error}` tool result, never a
//! fault.

mod flights;
mod hotels;

use thiserror::Error;

pub use flights::{FareSummary, FlightSearch, StaticFlightCatalog};
pub use hotels::{HotelSearch, PropertySummary, StaticHotelCatalog};

/// Errors from a travel lookup
#[derive(Debug, Error)]
pub enum TravelError {
    #[error("{service} lookup unavailable: {reason}")]
    Unavailable { service: String, reason: String },
}

/// Stable small hash for deterministic sample data
pub(crate) fn seed(parts: &[&str]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for part in parts {
        for byte in part.to_lowercase().bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }
    hash
}
