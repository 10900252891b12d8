use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use tower_cookies::Cookies;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppForm;
use crate::features::account::dtos::LoginDto;
use crate::features::account::services::AccountService;
use crate::shared::constants::{HOME_PATH, LOGIN_PATH};
use crate::shared::validation::FormErrors;
use crate::shared::views;

/// Only the email is echoed back, never the password
fn render_login(email: &str, errors: &FormErrors) -> Result<Html<String>> {
    views::render(
        "account/login.html",
        context! { email => email, errors => errors },
    )
}

/// GET /Account/Login
pub async fn login_form() -> Result<Html<String>> {
    render_login("", &FormErrors::new())
}

/// POST /Account/Login
pub async fn login(
    State(service): State<Arc<AccountService>>,
    cookies: Cookies,
    AppForm(dto): AppForm<LoginDto>,
) -> Result<Response> {
    match service.login(&dto).await {
        Ok(session_id) => {
            cookies.add(service.sessions().session_cookie(session_id));
            Ok(Redirect::to(HOME_PATH).into_response())
        }
        Err(AppError::Validation(errors)) => Ok(render_login(&dto.email, &errors)?.into_response()),
        Err(e) => Err(e),
    }
}

/// POST /Account/Logout
pub async fn logout(State(service): State<Arc<AccountService>>, cookies: Cookies) -> Redirect {
    let sessions = service.sessions();
    let current = cookies
        .get(sessions.cookie_name())
        .map(|c| c.value().to_string());

    service.logout(current.as_deref()).await;
    cookies.remove(sessions.removal_cookie());

    Redirect::to(LOGIN_PATH)
}
