use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::session::{SessionStore, SessionUser};
use crate::features::account::dtos::LoginDto;
use crate::features::users::services::password::verify_password;
use crate::features::users::services::UserStore;
use crate::shared::validation::FormErrors;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";
pub const INACTIVE_ACCOUNT_MESSAGE: &str = "Account is inactive. Contact admin.";

/// Login and logout against the credential store and the session store
pub struct AccountService {
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionStore>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<SessionStore>) -> Self {
        Self { users, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Check credentials and start a session, returning its id.
    ///
    /// Unknown email and wrong password produce the same message. An inactive
    /// account is reported before the password is checked.
    pub async fn login(&self, dto: &LoginDto) -> Result<Uuid> {
        dto.validate()
            .map_err(|e| AppError::Validation(FormErrors::from(e)))?;

        let Some(user) = self.users.find_by_email(&dto.email).await? else {
            tracing::warn!("Failed login attempt");
            return Err(AppError::Validation(FormErrors::form(
                INVALID_CREDENTIALS_MESSAGE,
            )));
        };

        if !user.is_active {
            tracing::warn!("Login refused for inactive user {}", user.id);
            return Err(AppError::Validation(FormErrors::form(
                INACTIVE_ACCOUNT_MESSAGE,
            )));
        }

        if !verify_password(&dto.password, &user.password_hash) {
            tracing::warn!("Failed login attempt");
            return Err(AppError::Validation(FormErrors::form(
                INVALID_CREDENTIALS_MESSAGE,
            )));
        }

        let session_id = self
            .sessions
            .create(SessionUser {
                user_id: user.id,
                full_name: user.full_name,
            })
            .await;

        tracing::info!("User {} logged in", user.id);
        Ok(session_id)
    }

    /// End the session behind a raw cookie value, if any
    pub async fn logout(&self, cookie_value: Option<&str>) {
        if let Some(id) = cookie_value.and_then(|v| Uuid::parse_str(v).ok()) {
            self.sessions.destroy(id).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SessionConfig;
    use crate::shared::test_helpers::{seed_user, InMemoryUserStore};

    async fn service_with_users() -> (AccountService, Arc<SessionStore>) {
        let users = Arc::new(InMemoryUserStore::new());
        seed_user(&users, "Ada Lovelace", "ada@example.com", "Password1!", true).await;
        seed_user(&users, "Old Timer", "old@example.com", "Password1!", false).await;

        let sessions = Arc::new(SessionStore::new(SessionConfig::default()));
        (AccountService::new(users, sessions.clone()), sessions)
    }

    fn login(email: &str, password: &str) -> LoginDto {
        LoginDto {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn form_errors(result: Result<Uuid>) -> Vec<String> {
        match result {
            Err(AppError::Validation(errors)) => errors.form,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_creates_session_with_identity() {
        let (service, sessions) = service_with_users().await;

        let id = service
            .login(&login("ada@example.com", "Password1!"))
            .await
            .unwrap();

        let user = sessions.get(id).await.unwrap();
        assert_eq!(user.full_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let (service, sessions) = service_with_users().await;

        let wrong_password = form_errors(service.login(&login("ada@example.com", "nope")).await);
        let unknown_email =
            form_errors(service.login(&login("nobody@example.com", "Password1!")).await);

        assert_eq!(wrong_password, [INVALID_CREDENTIALS_MESSAGE]);
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn test_inactive_account_is_refused() {
        let (service, _) = service_with_users().await;

        let errors = form_errors(service.login(&login("old@example.com", "Password1!")).await);
        assert_eq!(errors, [INACTIVE_ACCOUNT_MESSAGE]);
    }

    #[tokio::test]
    async fn test_missing_fields_are_field_errors() {
        let (service, _) = service_with_users().await;

        match service.login(&login("", "")).await {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.for_field("email"), ["Email is required."]);
                assert_eq!(errors.for_field("password"), ["Password is required."]);
                assert!(errors.form.is_empty());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_logout_destroys_session() {
        let (service, sessions) = service_with_users().await;
        let id = service
            .login(&login("ada@example.com", "Password1!"))
            .await
            .unwrap();

        service.logout(Some(&id.to_string())).await;
        assert_eq!(sessions.get(id).await, None);

        // Missing or garbage cookies are fine
        service.logout(None).await;
        service.logout(Some("garbage")).await;
    }
}
