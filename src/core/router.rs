use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, http::StatusCode, middleware::from_fn_with_state, routing::get,
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::middleware;
use crate::core::session::SessionStore;
use crate::features::account::{routes as account_routes, services::AccountService};
use crate::features::categories::{
    routes as categories_routes,
    services::{CategoryService, CategoryStore},
};
use crate::features::home::routes as home_routes;
use crate::features::tickets::{
    routes as tickets_routes,
    services::{TicketService, TicketStore},
};
use crate::features::users::{
    routes as users_routes,
    services::{UserService, UserStore},
};

/// Services shared by the HTTP handlers
pub struct AppServices {
    pub sessions: Arc<SessionStore>,
    pub account: Arc<AccountService>,
    pub users: Arc<UserService>,
    pub categories: Arc<CategoryService>,
    pub tickets: Arc<TicketService>,
}

impl AppServices {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        category_store: Arc<dyn CategoryStore>,
        ticket_store: Arc<dyn TicketStore>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            account: Arc::new(AccountService::new(
                Arc::clone(&user_store),
                Arc::clone(&sessions),
            )),
            users: Arc::new(UserService::new(user_store)),
            categories: Arc::new(CategoryService::new(Arc::clone(&category_store))),
            tickets: Arc::new(TicketService::new(ticket_store, category_store)),
            sessions,
        }
    }
}

// Simple health check endpoint (no session required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Assemble the application router with its middleware stack
pub fn build_router(services: AppServices, max_request_body_size: usize) -> Router {
    // Protected routes (require a logged-in session)
    let protected_routes = Router::new()
        .merge(home_routes::routes())
        .merge(users_routes::routes(services.users))
        .merge(categories_routes::routes(services.categories))
        .merge(tickets_routes::routes(services.tickets))
        .route_layer(from_fn_with_state(
            Arc::clone(&services.sessions),
            middleware::require_session,
        ));

    // Public routes
    let public_routes = Router::new()
        .merge(account_routes::routes(services.account))
        .route("/health", get(health_check));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(max_request_body_size))
        .layer(CookieManagerLayer::new())
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
