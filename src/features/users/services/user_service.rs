use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{CreateUserDto, UserListItemDto};
use crate::features::users::models::NewUser;
use crate::features::users::services::password::hash_password;
use crate::features::users::services::UserStore;
use crate::shared::validation::{is_strong_password, FormErrors};

pub const DUPLICATE_EMAIL_MESSAGE: &str = "A user with this email already exists.";
pub const WEAK_PASSWORD_MESSAGE: &str = "Password must be at least 8 characters and include uppercase, lowercase, number and special character.";

/// Service for user administration
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// All users ordered by full name
    pub async fn list(&self) -> Result<Vec<UserListItemDto>> {
        let users = self.store.list_all().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Create an active user.
    ///
    /// Checks run in order: required fields, email uniqueness, password
    /// strength. The first failing stage is reported as `AppError::Validation`.
    pub async fn create(&self, dto: &CreateUserDto) -> Result<i32> {
        dto.validate()
            .map_err(|e| AppError::Validation(FormErrors::from(e)))?;

        if self.store.email_exists(&dto.email).await? {
            return Err(AppError::Validation(FormErrors::field(
                "email",
                DUPLICATE_EMAIL_MESSAGE,
            )));
        }

        if !is_strong_password(&dto.password) {
            return Err(AppError::Validation(FormErrors::field(
                "password",
                WEAK_PASSWORD_MESSAGE,
            )));
        }

        let new_user = NewUser {
            full_name: dto.full_name.clone(),
            email: dto.email.clone(),
            password_hash: hash_password(&dto.password),
            is_active: true,
            created_at: Utc::now(),
        };

        // The unique constraint is authoritative when two creates race
        let id = self.store.insert(new_user).await.map_err(|e| match e {
            AppError::Conflict(_) => {
                AppError::Validation(FormErrors::field("email", DUPLICATE_EMAIL_MESSAGE))
            }
            other => other,
        })?;

        tracing::info!("Created user {}", id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::services::password::verify_password;
    use crate::shared::test_helpers::InMemoryUserStore;

    fn dto(full_name: &str, email: &str, password: &str) -> CreateUserDto {
        CreateUserDto {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn validation_errors(result: Result<i32>) -> FormErrors {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_stores_digest_and_activates() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = UserService::new(store.clone());

        let id = service
            .create(&dto("Ada Lovelace", "ada@example.com", "Password1!"))
            .await
            .unwrap();

        let users = store.users().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, id);
        assert!(users[0].is_active);

        let stored_hash = store.password_hash_of("ada@example.com").await.unwrap();
        assert_ne!(stored_hash, "Password1!");
        assert!(verify_password("Password1!", &stored_hash));
    }

    #[tokio::test]
    async fn test_duplicate_email_wins_over_weak_password() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = UserService::new(store.clone());
        service
            .create(&dto("Ada", "ada@example.com", "Password1!"))
            .await
            .unwrap();

        let errors = validation_errors(
            service
                .create(&dto("Other Ada", "ada@example.com", "weak"))
                .await,
        );

        assert_eq!(errors.for_field("email"), [DUPLICATE_EMAIL_MESSAGE]);
        assert!(errors.for_field("password").is_empty());
        assert_eq!(store.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_weak_passwords_are_rejected() {
        let service = UserService::new(Arc::new(InMemoryUserStore::new()));

        for weak in ["password1!", "PASSWORD1!", "Password!", "Password1", "Pw1!"] {
            let errors = validation_errors(
                service
                    .create(&dto("Ada", "ada@example.com", weak))
                    .await,
            );
            assert_eq!(errors.for_field("password"), [WEAK_PASSWORD_MESSAGE]);
        }
    }

    #[tokio::test]
    async fn test_required_fields_checked_before_store() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = UserService::new(store.clone());

        let errors = validation_errors(service.create(&dto("", "", "")).await);

        assert_eq!(errors.for_field("full_name"), ["Full name is required."]);
        assert_eq!(errors.for_field("email"), ["Email is required."]);
        assert_eq!(errors.for_field("password"), ["Password is required."]);
        assert!(store.users().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_full_name() {
        let service = UserService::new(Arc::new(InMemoryUserStore::new()));
        service
            .create(&dto("Zed", "zed@example.com", "Password1!"))
            .await
            .unwrap();
        service
            .create(&dto("Ada", "ada@example.com", "Password1!"))
            .await
            .unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.full_name)
            .collect();
        assert_eq!(names, ["Ada", "Zed"]);
    }
}
