use serde::Deserialize;
use validator::Validate;

use crate::shared::validation::{validate_email_address, validate_not_blank};

/// Form body for `POST /Account/Login`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginDto {
    #[serde(default)]
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Password is required."))]
    pub password: String,
}
