use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, NewCategory};

/// Persistence for the category taxonomy
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Every category, active or not, ordered by name
    async fn list_all(&self) -> Result<Vec<Category>>;

    async fn name_exists(&self, name: &str) -> Result<bool>;

    /// Insert a category and return its id. A duplicate name is a `Conflict`.
    async fn insert(&self, category: NewCategory) -> Result<i32>;

    /// Flip the active flag; `false` when no such category exists
    async fn toggle_active(&self, id: i32) -> Result<bool>;
}

pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn list_all(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, is_active, created_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn name_exists(&self, name: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check category name: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, category: NewCategory) -> Result<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO categories (name, is_active, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&category.name)
        .bind(category.is_active)
        .bind(category.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict(format!("Category '{}' already exists", category.name));
            }
            tracing::error!("Failed to insert category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn toggle_active(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("UPDATE categories SET is_active = NOT is_active WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to toggle category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
