use axum::{extract::State, Extension};

use crate::config::AppState;
use crate::dto::{UpdateUserRequest, UserResponse};
use crate::interceptors::{ApiSuccess, AppError, AppJson};
use crate::middleware::Claims;

/// Profile of the user identified by the bearer token
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiSuccess<UserResponse>, AppError> {
    let user = state.user_service().get_profile(&claims.id).await?;

    Ok(ApiSuccess::new("User profile retrieved successfully", user))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> Result<ApiSuccess<UserResponse>, AppError> {
    let user = state.user_service().update_profile(&claims.id, request).await?;

    Ok(ApiSuccess::new("User profile updated successfully", user))
}
