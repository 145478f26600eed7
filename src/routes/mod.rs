use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::config::AppState;
use crate::handlers::{
    create_trip, get_profile, get_trip, health_check, list_trips, login, not_found, register,
    request_travel_buddy, update_profile,
};
use crate::middleware::JwtMiddleware;

/// Create API router
pub fn create_router(state: AppState) -> Router {
    // Health check route (outside /api)
    let health_routes = Router::new()
        .route("/health", get(health_check));

    // Public API routes (no authentication required)
    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/trips", get(list_trips))
        .route("/trips/:id", get(get_trip));

    // Protected API routes (authentication required)
    let protected_routes = Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/trips", post(create_trip))
        .route("/trips/:id/request", post(request_travel_buddy))
        .route_layer(middleware::from_fn_with_state(state.clone(), JwtMiddleware::auth));

    Router::new()
        .merge(health_routes)
        .nest("/api", Router::new()
            .merge(public_routes)
            .merge(protected_routes)
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AppConfig, JwtConfig};
    use crate::middleware::{generate_token, Claims};
    use crate::repositories::{MockTripRepository, MockUserRepository};

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "router-secret".to_string(),
            expiration_seconds: 3600,
        }
    }

    fn state(trips: MockTripRepository, users: MockUserRepository) -> AppState {
        AppState {
            config: Arc::new(AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
                app_name: "travel-buddy-backend".to_string(),
                app_version: "0.0.0".to_string(),
            }),
            jwt: Arc::new(jwt()),
            users: Arc::new(users),
            trips: Arc::new(trips),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = create_router(state(MockTripRepository::new(), MockUserRepository::new()));
        let (status, body) = send(app, get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_gets_not_found_envelope() {
        let app = create_router(state(MockTripRepository::new(), MockUserRepository::new()));
        let (status, body) = send(app, get("/api/nowhere")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn trip_listing_returns_meta_and_data() {
        let mut trips = MockTripRepository::new();
        trips
            .expect_list()
            .withf(|query| query.filter.min_budget == Some(100.0) && query.filter.max_budget == Some(10000.0))
            .returning(|_| Ok((Vec::new(), 0)));

        let app = create_router(state(trips, MockUserRepository::new()));
        let (status, body) = send(app, get("/api/trips?minBudget=100&maxBudget=10000&page=3")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["page"], 3);
        assert_eq!(body["meta"]["limit"], 10);
        assert_eq!(body["meta"]["total"], 0);
        assert_eq!(body["data"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn malformed_listing_params_are_rejected() {
        let app = create_router(state(MockTripRepository::new(), MockUserRepository::new()));
        let (status, body) = send(app, get("/api/trips?page=abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn missing_trip_is_not_found() {
        let mut trips = MockTripRepository::new();
        trips.expect_find_with_owner().returning(|_| Ok(None));

        let app = create_router(state(trips, MockUserRepository::new()));
        let (status, body) = send(app, get("/api/trips/does-not-exist")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Trip not found");
    }

    #[tokio::test]
    async fn creating_a_trip_requires_a_token() {
        let mut trips = MockTripRepository::new();
        trips.expect_create().times(0);

        let app = create_router(state(trips, MockUserRepository::new()));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/trips")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"destination":"Oslo","startDate":"2024-01-01","endDate":"2024-01-05","budget":800}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn authenticated_user_creates_trip() {
        let mut trips = MockTripRepository::new();
        trips.expect_create().times(1).returning(|trip| Ok(trip));

        let token = generate_token(
            &Claims::new("owner-9".into(), "o@example.com".into(), "user".into(), 3600),
            &jwt(),
        )
        .unwrap();

        let app = create_router(state(trips, MockUserRepository::new()));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/trips")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(r#"{"destination":"Oslo","startDate":"2024-01-01","endDate":"2024-01-05","budget":800}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["userId"], "owner-9");
        assert_eq!(body["data"]["destination"], "Oslo");
    }

    #[tokio::test]
    async fn malformed_json_body_gets_bad_request_envelope() {
        let app = create_router(state(MockTripRepository::new(), MockUserRepository::new()));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn wrong_password_login_is_unauthorized_with_null_data() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|email| {
            Ok(Some(crate::models::User::new(
                "Ana".to_string(),
                email.to_string(),
                crate::utils::hash_password("right-password").unwrap(),
                None,
                None,
            )))
        });

        let app = create_router(state(MockTripRepository::new(), users));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"ana@example.com","password":"wrong-password"}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");
        assert_eq!(body["data"], Value::Null);
    }

    fn bearer(user_id: &str) -> String {
        let claims = Claims::new(user_id.to_string(), "ana@example.com".into(), "user".into(), 3600);
        format!("Bearer {}", generate_token(&claims, &jwt()).unwrap())
    }

    fn stored_user(id: &str, bio: Option<&str>) -> crate::models::User {
        let mut user = crate::models::User::new(
            "Ana".to_string(),
            "ana@example.com".to_string(),
            "hash".to_string(),
            bio.map(str::to_string),
            None,
        );
        user.id = id.to_string();
        user
    }

    #[tokio::test]
    async fn travel_buddy_request_is_created_pending() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(|id| id == "u1")
            .returning(|id| Ok(Some(stored_user(id, None))));
        let mut trips = MockTripRepository::new();
        trips.expect_exists().withf(|id| id == "t1").returning(|_| Ok(true));
        trips.expect_create_buddy_request().times(1).returning(|request| Ok(request));

        let app = create_router(state(trips, users));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/trips/t1/request")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, bearer("u1"))
            .body(Body::from(r#"{"userId":"u1"}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["tripId"], "t1");
        assert_eq!(body["data"]["userId"], "u1");
        assert_eq!(body["data"]["status"], "PENDING");
    }

    #[tokio::test]
    async fn travel_buddy_request_for_missing_trip_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|id| Ok(Some(stored_user(id, None))));
        let mut trips = MockTripRepository::new();
        trips.expect_exists().returning(|_| Ok(false));
        trips.expect_create_buddy_request().times(0);

        let app = create_router(state(trips, users));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/trips/gone/request")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, bearer("u1"))
            .body(Body::from(r#"{"userId":"u1"}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Trip not found");
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn profile_is_read_for_the_token_subject() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(|id| id == "user-7")
            .returning(|id| Ok(Some(stored_user(id, Some("Hiker")))));

        let app = create_router(state(MockTripRepository::new(), users));
        let request = Request::builder()
            .uri("/api/profile")
            .header(header::AUTHORIZATION, bearer("user-7"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "user-7");
        assert_eq!(body["data"]["bio"], "Hiker");
        assert!(body["data"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn profile_requires_a_token() {
        let app = create_router(state(MockTripRepository::new(), MockUserRepository::new()));
        let (status, body) = send(app, get("/api/profile")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn profile_update_returns_the_stored_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_update()
            .withf(|id, request| id == "user-7" && request.bio.as_deref() == Some("Sailor"))
            .returning(|id, request| Ok(Some(stored_user(id, request.bio.as_deref()))));

        let app = create_router(state(MockTripRepository::new(), users));
        let request = Request::builder()
            .method(Method::PUT)
            .uri("/api/profile")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, bearer("user-7"))
            .body(Body::from(r#"{"bio":"Sailor"}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "user-7");
        assert_eq!(body["data"]["bio"], "Sailor");
    }
}
