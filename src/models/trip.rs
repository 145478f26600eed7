use chrono::{DateTime, NaiveDate, Utc};
use sea_query::Iden;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::dto::CreateTripRequest;

/// Column identifiers of the `trips` table for sea-query statements.
#[derive(Iden, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trips {
    Table,
    Id,
    UserId,
    Destination,
    Description,
    TravelType,
    StartDate,
    EndDate,
    Budget,
    CreatedAt,
    UpdatedAt,
}

/// Trip model (database entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub user_id: String,
    pub destination: String,
    pub description: Option<String>,
    pub travel_type: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Create a new trip owned by `user_id`
    pub fn new(user_id: String, request: CreateTripRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            destination: request.destination,
            description: request.description,
            travel_type: request.travel_type,
            start_date: request.start_date,
            end_date: request.end_date,
            budget: request.budget,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public fields of a trip owner, nested under `user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OwnerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripWithOwner {
    #[serde(flatten)]
    pub trip: Trip,
    pub user: OwnerSummary,
}
