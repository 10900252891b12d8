//! HTML view rendering using Jinja2 syntax.
//!
//! Templates are compiled into the binary and registered once in a global
//! environment. Names ending in `.html` are auto-escaped.

use axum::response::Html;
use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

use crate::core::error::AppError;

/// Global template environment
static VIEW_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Every view template, keyed by its name relative to `templates/views/`
const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/views/layout.html")),
    ("error.html", include_str!("../../templates/views/error.html")),
    ("home.html", include_str!("../../templates/views/home.html")),
    (
        "account/login.html",
        include_str!("../../templates/views/account/login.html"),
    ),
    (
        "users/index.html",
        include_str!("../../templates/views/users/index.html"),
    ),
    (
        "users/create.html",
        include_str!("../../templates/views/users/create.html"),
    ),
    (
        "categories/index.html",
        include_str!("../../templates/views/categories/index.html"),
    ),
    (
        "categories/create.html",
        include_str!("../../templates/views/categories/create.html"),
    ),
    (
        "tickets/index.html",
        include_str!("../../templates/views/tickets/index.html"),
    ),
    (
        "tickets/create.html",
        include_str!("../../templates/views/tickets/create.html"),
    ),
    (
        "tickets/details.html",
        include_str!("../../templates/views/tickets/details.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        AppError::Internal(e.to_string())
    }
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for &(name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    VIEW_ENV.get_or_init(init_environment)
}

/// Render a template to a string.
///
/// # Example
/// ```ignore
/// let body = render_html("tickets/index.html", minijinja::context! { tickets => tickets })?;
/// ```
pub fn render_html(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Render a template as an HTML response body
pub fn render(template_name: &str, ctx: Value) -> Result<Html<String>, AppError> {
    Ok(Html(render_html(template_name, ctx)?))
}

/// Check if a template exists
#[cfg(test)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        for &(name, _) in TEMPLATES {
            assert!(template_exists(name), "template {} failed to load", name);
        }
    }

    #[test]
    fn test_render_unknown_template() {
        let result = render_html("definitely_not_a_real_template.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_render_escapes_html() {
        let body = render_html(
            "error.html",
            context! { status => 400, title => "Bad Request", message => "<script>x</script>" },
        )
        .unwrap();
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>x</script>"));
    }
}
