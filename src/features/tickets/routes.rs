use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::tickets::handlers;
use crate::features::tickets::services::TicketService;

/// Create routes for the tickets feature
///
/// Note: These routes sit behind the session guard
pub fn routes(service: Arc<TicketService>) -> Router {
    Router::new()
        .route("/Tickets", get(handlers::list_tickets))
        .route(
            "/Tickets/Create",
            get(handlers::create_ticket_form).post(handlers::create_ticket),
        )
        .route("/Tickets/Details/{id}", get(handlers::ticket_details))
        .route("/Tickets/AddComment/{id}", post(handlers::add_comment))
        .route("/Tickets/Delete", post(handlers::delete_ticket))
        .route("/Tickets/UpdateStatus/{id}", post(handlers::update_status))
        .with_state(service)
}
