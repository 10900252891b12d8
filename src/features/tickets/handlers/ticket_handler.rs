use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppForm, AppPath};
use crate::core::session::SessionUser;
use crate::features::tickets::dtos::{
    AddCommentDto, CreateTicketDto, DeleteTicketDto, TicketListQuery, UpdateStatusDto,
};
use crate::features::tickets::services::TicketService;
use crate::shared::validation::FormErrors;
use crate::shared::views;

async fn render_create_form(
    service: &TicketService,
    user: &SessionUser,
    values: &CreateTicketDto,
    errors: &FormErrors,
) -> Result<Html<String>> {
    let categories = service.active_categories().await?;
    views::render(
        "tickets/create.html",
        context! {
            current_user => user,
            categories => categories,
            values => values,
            errors => errors,
        },
    )
}

/// Details page; `comment_text` refills the comment box after a failed submit
async fn render_details(
    service: &TicketService,
    user: &SessionUser,
    id: i32,
    comment_text: &str,
    errors: &FormErrors,
) -> Result<Html<String>> {
    let view = service.details(id).await?;
    views::render(
        "tickets/details.html",
        context! {
            current_user => user,
            ticket => view.ticket,
            comments => view.comments,
            is_closed => view.is_closed,
            new_comment_text => comment_text,
            errors => errors,
        },
    )
}

/// GET /Tickets?search=&status=&categoryId=&page=
pub async fn list_tickets(
    user: SessionUser,
    State(service): State<Arc<TicketService>>,
    Query(query): Query<TicketListQuery>,
) -> Result<Html<String>> {
    let view = service.list(&query).await?;
    views::render(
        "tickets/index.html",
        context! {
            current_user => user,
            tickets => view.tickets,
            filter => view.filter,
            pagination => view.pagination,
            has_previous => view.pagination.has_previous(),
            has_next => view.pagination.has_next(),
            categories => view.categories,
        },
    )
}

/// GET /Tickets/Create
pub async fn create_ticket_form(
    user: SessionUser,
    State(service): State<Arc<TicketService>>,
) -> Result<Html<String>> {
    render_create_form(&service, &user, &CreateTicketDto::default(), &FormErrors::new()).await
}

/// POST /Tickets/Create
pub async fn create_ticket(
    user: SessionUser,
    State(service): State<Arc<TicketService>>,
    AppForm(dto): AppForm<CreateTicketDto>,
) -> Result<Response> {
    match service.create(&dto, user.user_id).await {
        Ok(_) => Ok(Redirect::to("/Tickets").into_response()),
        Err(AppError::Validation(errors)) => {
            let page = render_create_form(&service, &user, &dto, &errors).await?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /Tickets/Details/{id}
pub async fn ticket_details(
    user: SessionUser,
    State(service): State<Arc<TicketService>>,
    AppPath(id): AppPath<i32>,
) -> Result<Html<String>> {
    render_details(&service, &user, id, "", &FormErrors::new()).await
}

/// POST /Tickets/AddComment/{id}
pub async fn add_comment(
    user: SessionUser,
    State(service): State<Arc<TicketService>>,
    AppPath(id): AppPath<i32>,
    AppForm(dto): AppForm<AddCommentDto>,
) -> Result<Response> {
    match service.add_comment(id, &dto, user.user_id).await {
        Ok(()) => Ok(Redirect::to(&format!("/Tickets/Details/{}", id)).into_response()),
        Err(AppError::Validation(errors)) => {
            let page = render_details(&service, &user, id, &dto.new_comment_text, &errors).await?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

/// POST /Tickets/Delete
pub async fn delete_ticket(
    State(service): State<Arc<TicketService>>,
    AppForm(dto): AppForm<DeleteTicketDto>,
) -> Result<Redirect> {
    if let Some(id) = dto.id {
        service.delete(id).await?;
    }
    Ok(Redirect::to("/Tickets"))
}

/// POST /Tickets/UpdateStatus/{id}
pub async fn update_status(
    user: SessionUser,
    State(service): State<Arc<TicketService>>,
    AppPath(id): AppPath<i32>,
    AppForm(dto): AppForm<UpdateStatusDto>,
) -> Result<Response> {
    match service.update_status(id, &dto).await {
        Ok(()) => Ok(Redirect::to(&format!("/Tickets/Details/{}", id)).into_response()),
        Err(AppError::Validation(errors)) => {
            let page = render_details(&service, &user, id, "", &errors).await?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}
