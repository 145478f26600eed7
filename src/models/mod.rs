pub mod travel_buddy;
pub mod trip;
pub mod user;

pub use travel_buddy::TravelBuddyRequest;
pub use trip::{OwnerSummary, Trip, TripWithOwner, Trips};
pub use user::User;
