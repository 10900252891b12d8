use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppForm;
use crate::core::session::SessionUser;
use crate::features::users::dtos::{CreateUserDto, UserFormValues};
use crate::features::users::services::UserService;
use crate::shared::validation::FormErrors;
use crate::shared::views;

fn render_create_form(
    user: &SessionUser,
    values: &UserFormValues,
    errors: &FormErrors,
) -> Result<Html<String>> {
    views::render(
        "users/create.html",
        context! {
            current_user => user,
            values => values,
            errors => errors,
        },
    )
}

/// GET /Users
pub async fn list_users(
    user: SessionUser,
    State(service): State<Arc<UserService>>,
) -> Result<Html<String>> {
    let users = service.list().await?;
    views::render(
        "users/index.html",
        context! { current_user => user, users => users },
    )
}

/// GET /Users/Create
pub async fn create_user_form(user: SessionUser) -> Result<Html<String>> {
    render_create_form(&user, &UserFormValues::default(), &FormErrors::new())
}

/// POST /Users/Create
pub async fn create_user(
    user: SessionUser,
    State(service): State<Arc<UserService>>,
    AppForm(dto): AppForm<CreateUserDto>,
) -> Result<Response> {
    match service.create(&dto).await {
        Ok(_) => Ok(Redirect::to("/Users").into_response()),
        Err(AppError::Validation(errors)) => {
            Ok(render_create_form(&user, &UserFormValues::from(&dto), &errors)?.into_response())
        }
        Err(e) => Err(e),
    }
}
