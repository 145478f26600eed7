use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{AppState, JwtConfig};
use crate::interceptors::AppError;

/// JWT Claims structure - identifies the authenticated user
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Create claims valid for `expiration_seconds` from now
    pub fn new(id: String, email: String, role: String, expiration_seconds: i64) -> Self {
        let iat = Utc::now();
        let exp = iat + Duration::seconds(expiration_seconds);

        Self {
            id,
            email,
            role,
            exp: exp.timestamp(),
            iat: iat.timestamp(),
        }
    }
}

/// Generate JWT token from claims
pub fn generate_token(claims: &Claims, config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::JwtError)
}

/// Verify and decode JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::warn!("JWT verification failed: {}", e);
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::Unauthorized("Token expired".to_string())
            }
            _ => AppError::Unauthorized("Invalid token".to_string()),
        }
    })?;

    Ok(token_data.claims)
}

/// JWT Authentication Middleware
pub struct JwtMiddleware;

impl JwtMiddleware {
    pub async fn auth(
        State(state): State<AppState>,
        mut request: Request,
        next: Next,
    ) -> Result<Response, AppError> {
        // Extract token from Authorization header
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("You are not authorized".to_string()))?;

        // Accept both "Bearer <token>" and a bare token
        let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header).trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("You are not authorized".to_string()));
        }

        let claims = verify_token(token, &state.jwt)?;

        // Add claims to request extensions for handlers to use
        request.extensions_mut().insert(claims);

        Ok(next.run(request).await)
    }
}
