use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{NewUser, User, UserCredentials};

/// Persistence for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Login lookup; exact match on the stored email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;

    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Insert a user and return its id. A duplicate email is a `Conflict`.
    async fn insert(&self, user: NewUser) -> Result<i32>;

    /// All users ordered by full name
    async fn list_all(&self) -> Result<Vec<User>>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, full_name, password_hash, is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check user email: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, user: NewUser) -> Result<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (full_name, email, password_hash, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict(format!("Email '{}' is already registered", user.email));
            }
            tracing::error!("Failed to insert user: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, is_active, created_at
            FROM users
            ORDER BY full_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })
    }
}
