use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create trip request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    #[validate(length(min = 1, max = 200, message = "Destination must be between 1 and 200 characters"))]
    pub destination: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Travel type must be between 1 and 50 characters"))]
    pub travel_type: Option<String>,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget: f64,
}

/// Body of a travel buddy request, the trip id comes from the path
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TravelBuddyRequestBody {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,
}
