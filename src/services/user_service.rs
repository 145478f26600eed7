use std::sync::Arc;

use crate::config::JwtConfig;
use crate::dto::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse};
use crate::interceptors::{AppError, AppResult};
use crate::middleware::{generate_token, Claims};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::utils::{hash_password, validate_request, verify_password};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtConfig>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtConfig>) -> Self {
        Self { users, jwt }
    }

    /// Register a new user
    pub async fn register(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        // Validate request
        validate_request(&request)?;

        // Check if user already exists
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("User with this email already exists".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(request.name, request.email, password_hash, request.bio, request.age);

        let inserted = self.users.create(user).await?;
        tracing::info!(user_id = %inserted.id, "User registered");

        Ok(inserted.to_response())
    }

    /// Login user
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        validate_request(&request)?;

        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(invalid());
        }

        let claims = Claims::new(
            user.id.clone(),
            user.email.clone(),
            user.role.clone(),
            self.jwt.expiration_seconds,
        );
        let token = generate_token(&claims, &self.jwt)?;

        Ok(LoginResponse {
            token,
            user: user.to_response(),
        })
    }

    /// Profile of the authenticated user
    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserResponse> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.to_response())
    }

    /// Update the authenticated user's profile
    pub async fn update_profile(&self, user_id: &str, request: UpdateUserRequest) -> AppResult<UserResponse> {
        validate_request(&request)?;

        if let Some(email) = &request.email {
            // Check if email already exists for another user
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != user_id {
                    return Err(AppError::Conflict("Email already in use".to_string()));
                }
            }
        }

        let updated = self
            .users
            .update(user_id, request)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(updated.to_response())
    }
}
