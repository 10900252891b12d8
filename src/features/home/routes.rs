use axum::{routing::get, Router};

use crate::features::home::handlers;

/// Landing page, behind the session guard
pub fn routes() -> Router {
    Router::new().route("/", get(handlers::home))
}
