use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature
///
/// Note: These routes sit behind the session guard
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/Users", get(handlers::list_users))
        .route(
            "/Users/Create",
            get(handlers::create_user_form).post(handlers::create_user),
        )
        .with_state(service)
}
