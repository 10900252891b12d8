use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto};
use crate::features::categories::models::NewCategory;
use crate::features::categories::services::CategoryStore;
use crate::shared::validation::FormErrors;

pub const DUPLICATE_CATEGORY_MESSAGE: &str = "A category with this name already exists.";

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// All categories ordered by name, including inactive ones
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, dto: &CreateCategoryDto) -> Result<i32> {
        dto.validate()
            .map_err(|e| AppError::Validation(FormErrors::from(e)))?;

        if self.store.name_exists(&dto.name).await? {
            return Err(AppError::Validation(FormErrors::field(
                "name",
                DUPLICATE_CATEGORY_MESSAGE,
            )));
        }

        let category = NewCategory {
            name: dto.name.clone(),
            is_active: true,
            created_at: Utc::now(),
        };

        let id = self.store.insert(category).await.map_err(|e| match e {
            AppError::Conflict(_) => {
                AppError::Validation(FormErrors::field("name", DUPLICATE_CATEGORY_MESSAGE))
            }
            other => other,
        })?;

        tracing::info!("Created category {}", id);
        Ok(id)
    }

    /// Flip a category's active flag. Unknown ids are ignored.
    pub async fn toggle_active(&self, id: i32) -> Result<()> {
        if self.store.toggle_active(id).await? {
            tracing::info!("Toggled category {}", id);
        } else {
            tracing::debug!("Toggle ignored, category {} not found", id);
        }
        Ok(())
    }
}
