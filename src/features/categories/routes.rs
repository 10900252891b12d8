use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: These routes sit behind the session guard
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/Categories", get(handlers::list_categories))
        .route(
            "/Categories/Create",
            get(handlers::create_category_form).post(handlers::create_category),
        )
        .route("/Categories/ToggleActive", post(handlers::toggle_active))
        .with_state(service)
}
