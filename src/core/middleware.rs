use crate::core::session::SessionStore;
use crate::shared::constants::LOGIN_PATH;
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_cookies::Cookies;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

/// Session guard for protected routes.
///
/// Resolves the session cookie and stores the [`SessionUser`] in request
/// extensions. Anonymous or expired sessions are redirected to the login page
/// without running the handler.
pub async fn require_session(
    State(sessions): State<Arc<SessionStore>>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match cookies.get(sessions.cookie_name()) {
        Some(cookie) => sessions.get_by_cookie_value(cookie.value()).await,
        None => None,
    };

    match user {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => {
            tracing::debug!("Anonymous request to {}, redirecting to login", req.uri());
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}
