use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Columns needed to check a login attempt
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub full_name: String,
    pub password_hash: String,
    pub is_active: bool,
}

/// Row to insert; the password is already digested
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
