use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppForm;
use crate::core::session::SessionUser;
use crate::features::categories::dtos::{CreateCategoryDto, ToggleCategoryDto};
use crate::features::categories::services::CategoryService;
use crate::shared::validation::FormErrors;
use crate::shared::views;

fn render_create_form(
    user: &SessionUser,
    values: &CreateCategoryDto,
    errors: &FormErrors,
) -> Result<Html<String>> {
    views::render(
        "categories/create.html",
        context! {
            current_user => user,
            values => values,
            errors => errors,
        },
    )
}

/// GET /Categories
pub async fn list_categories(
    user: SessionUser,
    State(service): State<Arc<CategoryService>>,
) -> Result<Html<String>> {
    let categories = service.list().await?;
    views::render(
        "categories/index.html",
        context! { current_user => user, categories => categories },
    )
}

/// GET /Categories/Create
pub async fn create_category_form(user: SessionUser) -> Result<Html<String>> {
    render_create_form(&user, &CreateCategoryDto::default(), &FormErrors::new())
}

/// POST /Categories/Create
pub async fn create_category(
    user: SessionUser,
    State(service): State<Arc<CategoryService>>,
    AppForm(dto): AppForm<CreateCategoryDto>,
) -> Result<Response> {
    match service.create(&dto).await {
        Ok(_) => Ok(Redirect::to("/Categories").into_response()),
        Err(AppError::Validation(errors)) => {
            Ok(render_create_form(&user, &dto, &errors)?.into_response())
        }
        Err(e) => Err(e),
    }
}

/// POST /Categories/ToggleActive
///
/// Always lands back on the list, a missing or malformed id changes nothing
pub async fn toggle_active(
    State(service): State<Arc<CategoryService>>,
    AppForm(dto): AppForm<ToggleCategoryDto>,
) -> Result<Redirect> {
    if let Some(id) = dto.id {
        service.toggle_active(id).await?;
    }
    Ok(Redirect::to("/Categories"))
}
