use async_trait::async_trait;
use sqlx::PgPool;

use crate::dto::UpdateUserRequest;
use crate::interceptors::{AppError, AppResult};
use crate::models::User;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Applies the present fields of `changes`, `None` when the user does not exist
    async fn update(&self, id: &str, changes: UpdateUserRequest) -> AppResult<Option<User>>;
}

/// User repository holding a PostgreSQL pool (cheap to clone)
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, role, bio, age, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(&user.bio)
        .bind(user.age)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "User with this email already exists"))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update(&self, id: &str, changes: UpdateUserRequest) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET
                name = COALESCE($1, name),
                email = COALESCE($2, email),
                bio = COALESCE($3, bio),
                age = COALESCE($4, age),
                updated_at = NOW()
             WHERE id = $5
             RETURNING *",
        )
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.bio)
        .bind(changes.age)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Email already in use"))
    }
}
