pub mod auth_handler;
pub mod health_handler;
pub mod trip_handler;
pub mod user_handler;

pub use auth_handler::{login, register};
pub use health_handler::{health_check, not_found};
pub use trip_handler::{create_trip, get_trip, list_trips, request_travel_buddy};
pub use user_handler::{get_profile, update_profile};
