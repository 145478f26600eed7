pub mod trip_query;
pub mod trip_service;
pub mod user_service;

pub use trip_service::TripService;
pub use user_service::UserService;
