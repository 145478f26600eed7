use async_trait::async_trait;
use sea_query::PostgresQueryBuilder;
use sea_query_binder::SqlxBinder;
use sqlx::{PgPool, Row};

use crate::interceptors::AppResult;
use crate::models::{OwnerSummary, TravelBuddyRequest, Trip, TripWithOwner};
use crate::services::trip_query::TripListQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create(&self, trip: Trip) -> AppResult<Trip>;

    async fn exists(&self, id: &str) -> AppResult<bool>;

    /// Trip joined with the public fields of its owner
    async fn find_with_owner(&self, id: &str) -> AppResult<Option<TripWithOwner>>;

    /// Page of matching trips plus the total number of matches
    async fn list(&self, query: &TripListQuery) -> AppResult<(Vec<Trip>, u64)>;

    async fn create_buddy_request(&self, request: TravelBuddyRequest) -> AppResult<TravelBuddyRequest>;
}

/// Trip repository holding a PostgreSQL pool (cheap to clone)
#[derive(Clone)]
pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn create(&self, trip: Trip) -> AppResult<Trip> {
        let trip = sqlx::query_as::<_, Trip>(
            "INSERT INTO trips (id, user_id, destination, description, travel_type, start_date, end_date, budget, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(&trip.id)
        .bind(&trip.user_id)
        .bind(&trip.destination)
        .bind(&trip.description)
        .bind(&trip.travel_type)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.budget)
        .bind(trip.created_at)
        .bind(trip.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    async fn exists(&self, id: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM trips WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn find_with_owner(&self, id: &str) -> AppResult<Option<TripWithOwner>> {
        let Some(trip) = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, OwnerSummary>(
            "SELECT id, name, email, role FROM users WHERE id = $1",
        )
        .bind(&trip.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(TripWithOwner { trip, user }))
    }

    async fn list(&self, query: &TripListQuery) -> AppResult<(Vec<Trip>, u64)> {
        let (page_sql, page_values) = query.page_statement().build_sqlx(PostgresQueryBuilder);
        let (count_sql, count_values) = query.count_statement().build_sqlx(PostgresQueryBuilder);

        tracing::debug!(sql = %page_sql, "Listing trips");

        // Page and count read from one snapshot so `total` agrees with the page
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let trips = sqlx::query_as_with::<_, Trip, _>(&page_sql, page_values)
            .fetch_all(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_with(&count_sql, count_values)
            .fetch_one(&mut *tx)
            .await?
            .try_get(0)?;

        tx.commit().await?;

        Ok((trips, total.max(0) as u64))
    }

    async fn create_buddy_request(&self, request: TravelBuddyRequest) -> AppResult<TravelBuddyRequest> {
        let request = sqlx::query_as::<_, TravelBuddyRequest>(
            "INSERT INTO travel_buddy_requests (id, trip_id, user_id, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&request.id)
        .bind(&request.trip_id)
        .bind(&request.user_id)
        .bind(&request.status)
        .bind(request.created_at)
        .bind(request.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }
}
