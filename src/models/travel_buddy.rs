use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status every new request starts in
pub const PENDING_STATUS: &str = "PENDING";

/// A user's request to join someone else's trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TravelBuddyRequest {
    pub id: String,
    pub trip_id: String,
    pub user_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TravelBuddyRequest {
    pub fn new(trip_id: String, user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id,
            user_id,
            status: PENDING_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
