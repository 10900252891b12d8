use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::forms::lenient_option;
use crate::shared::validation::validate_not_blank;

/// Form body for `POST /Categories/Create`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateCategoryDto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Category name is required."))]
    pub name: String,
}

/// Form body for `POST /Categories/ToggleActive`
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleCategoryDto {
    #[serde(default, deserialize_with = "lenient_option")]
    pub id: Option<i32>,
}

/// Category as shown in lists and dropdowns
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            is_active: c.is_active,
            created_at: c.created_at,
        }
    }
}
