//! Built-in planning tools

mod finalize_trip;
mod flight_search;
mod hotel_search;
mod slot_requests;

pub use finalize_trip::{FinalizeTripTool, FINALIZE_TRIP};
pub use flight_search::FlightSearchTool;
pub use hotel_search::HotelSearchTool;
pub use slot_requests::{slot_kind_for, slot_request_definition, REQUEST_DATES, REQUEST_GUESTS};
