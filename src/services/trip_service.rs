use std::collections::HashMap;
use std::sync::Arc;

use crate::dto::{CreateTripRequest, PageMeta, PaginatedResponse};
use crate::interceptors::{AppError, AppResult};
use crate::middleware::Claims;
use crate::models::{TravelBuddyRequest, Trip, TripWithOwner};
use crate::repositories::{TripRepository, UserRepository};
use crate::services::trip_query::TripListQuery;
use crate::utils::validate_request;

#[derive(Clone)]
pub struct TripService {
    trips: Arc<dyn TripRepository>,
    users: Arc<dyn UserRepository>,
}

impl TripService {
    pub fn new(trips: Arc<dyn TripRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { trips, users }
    }

    /// Create a trip owned by the authenticated user
    pub async fn create_trip(&self, owner: &Claims, request: CreateTripRequest) -> AppResult<Trip> {
        validate_request(&request)?;

        if request.end_date < request.start_date {
            return Err(AppError::ValidationError(
                "endDate: must not be before startDate".to_string(),
            ));
        }

        let trip = self.trips.create(Trip::new(owner.id.clone(), request)).await?;
        tracing::info!(trip_id = %trip.id, user_id = %trip.user_id, "Trip created");

        Ok(trip)
    }

    /// Filtered, sorted page of trips with `{ page, limit, total }`
    pub async fn list_trips(&self, params: &HashMap<String, String>) -> AppResult<PaginatedResponse<Trip>> {
        let query = TripListQuery::from_params(params)?;
        let (data, total) = self.trips.list(&query).await?;

        Ok(PaginatedResponse {
            meta: PageMeta {
                page: query.page,
                limit: query.limit,
                total,
            },
            data,
        })
    }

    pub async fn get_trip_by_id(&self, id: &str) -> AppResult<TripWithOwner> {
        self.trips
            .find_with_owner(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))
    }

    /// Ask to join a trip; both the user and the trip must already exist
    pub async fn request_travel_buddy(&self, trip_id: &str, user_id: &str) -> AppResult<TravelBuddyRequest> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        if !self.trips.exists(trip_id).await? {
            return Err(AppError::NotFound("Trip not found".to_string()));
        }

        let request = self
            .trips
            .create_buddy_request(TravelBuddyRequest::new(trip_id.to_string(), user_id.to_string()))
            .await?;

        tracing::info!(request_id = %request.id, trip_id, user_id, "Travel buddy requested");

        Ok(request)
    }
}
