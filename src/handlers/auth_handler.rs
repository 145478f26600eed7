use axum::extract::State;

use crate::config::AppState;
use crate::dto::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};
use crate::interceptors::{ApiSuccess, AppError, AppJson};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<ApiSuccess<UserResponse>, AppError> {
    let user = state.user_service().register(request).await?;

    Ok(ApiSuccess::created("User registered successfully", user))
}

/// Login user
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponse>, AppError> {
    let response = state.user_service().login(request).await?;

    Ok(ApiSuccess::new("User logged in successfully", response))
}
