//! Storage-client handles over an injected PostgreSQL pool.
//!
//! Services depend on the traits so they can be exercised against mocks.

mod trip_repo;
mod user_repo;

pub use trip_repo::{PgTripRepository, TripRepository};
pub use user_repo::{PgUserRepository, UserRepository};

#[cfg(test)]
pub use trip_repo::MockTripRepository;
#[cfg(test)]
pub use user_repo::MockUserRepository;
