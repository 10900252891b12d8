use axum::response::Html;
use minijinja::context;

use crate::core::error::Result;
use crate::core::session::SessionUser;
use crate::shared::views;

/// GET /
pub async fn home(user: SessionUser) -> Result<Html<String>> {
    views::render("home.html", context! { current_user => user })
}
