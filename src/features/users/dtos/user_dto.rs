use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::users::models::User;
use crate::shared::validation::{validate_email_address, validate_not_blank};

/// Form body for `POST /Users/Create`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Full name is required."))]
    pub full_name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Password is required."))]
    pub password: String,
}

/// Values echoed back into the create form after a failed submit.
/// The password is deliberately absent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFormValues {
    pub full_name: String,
    pub email: String,
}

impl From<&CreateUserDto> for UserFormValues {
    fn from(dto: &CreateUserDto) -> Self {
        Self {
            full_name: dto.full_name.clone(),
            email: dto.email.clone(),
        }
    }
}

/// Row of the user list page
#[derive(Debug, Clone, Serialize)]
pub struct UserListItemDto {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserListItemDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}
