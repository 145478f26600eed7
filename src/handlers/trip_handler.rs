use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Extension,
};

use crate::config::AppState;
use crate::dto::{CreateTripRequest, TravelBuddyRequestBody};
use crate::interceptors::{ApiSuccess, AppError, AppJson};
use crate::middleware::Claims;
use crate::models::{TravelBuddyRequest, Trip, TripWithOwner};
use crate::utils::validate_request;

pub async fn create_trip(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(request): AppJson<CreateTripRequest>,
) -> Result<ApiSuccess<Trip>, AppError> {
    let trip = state.trip_service().create_trip(&claims, request).await?;

    Ok(ApiSuccess::created("Trip created successfully", trip))
}

/// Filtered and paginated trip listing, see `services::trip_query` for the parameters
pub async fn list_trips(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiSuccess<Vec<Trip>>, AppError> {
    let page = state.trip_service().list_trips(&params).await?;

    Ok(ApiSuccess::paginated("Trips retrieved successfully", page))
}

pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<TripWithOwner>, AppError> {
    let trip = state.trip_service().get_trip_by_id(&id).await?;

    Ok(ApiSuccess::new("Trip retrieved successfully", trip))
}

pub async fn request_travel_buddy(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    AppJson(body): AppJson<TravelBuddyRequestBody>,
) -> Result<ApiSuccess<TravelBuddyRequest>, AppError> {
    validate_request(&body)?;

    let request = state
        .trip_service()
        .request_travel_buddy(&trip_id, &body.user_id)
        .await?;

    Ok(ApiSuccess::created("Travel buddy request sent successfully", request))
}
