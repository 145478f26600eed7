pub mod pagination;
pub mod trip_dto;
pub mod user_dto;

pub use pagination::{PageMeta, PaginatedResponse};
pub use trip_dto::{CreateTripRequest, TravelBuddyRequestBody};
pub use user_dto::{
    CreateUserRequest,
    LoginRequest,
    LoginResponse,
    UpdateUserRequest,
    UserResponse,
};
