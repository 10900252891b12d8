use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::account::handlers;
use crate::features::account::services::AccountService;

/// Create routes for the account feature
///
/// Note: This feature is public (no session required)
pub fn routes(service: Arc<AccountService>) -> Router {
    Router::new()
        .route(
            "/Account/Login",
            get(handlers::login_form).post(handlers::login),
        )
        .route("/Account/Logout", post(handlers::logout))
        .with_state(service)
}
