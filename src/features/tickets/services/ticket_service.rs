use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::services::CategoryStore;
use crate::features::tickets::dtos::{
    AddCommentDto, CreateTicketDto, TicketDetailsView, TicketListQuery, TicketListView,
    UpdateStatusDto,
};
use crate::features::tickets::models::{NewComment, NewTicket};
use crate::features::tickets::services::TicketStore;
use crate::shared::constants::{MAX_STATUS_LENGTH, STATUS_OPEN};
use crate::shared::types::Pagination;
use crate::shared::validation::FormErrors;

pub const CLOSED_TICKET_MESSAGE: &str = "Cannot add comments to a closed ticket.";
pub const INACTIVE_CATEGORY_MESSAGE: &str = "Please select an active category.";

/// Service for ticket operations
pub struct TicketService {
    tickets: Arc<dyn TicketStore>,
    categories: Arc<dyn CategoryStore>,
}

impl TicketService {
    pub fn new(tickets: Arc<dyn TicketStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self {
            tickets,
            categories,
        }
    }

    /// One page of the filtered ticket list.
    ///
    /// The requested page is clamped to the available pages before the window
    /// is fetched, so the count and the rows come from the same filter.
    pub async fn list(&self, query: &TicketListQuery) -> Result<TicketListView> {
        let filter = query.filter();
        let total_count = self.tickets.count_filtered(&filter).await?;
        let pagination = Pagination::for_tickets(query.page(), total_count);

        let tickets = self
            .tickets
            .list_filtered(&filter, pagination.offset(), pagination.limit())
            .await?;
        let categories = self.all_categories().await?;

        Ok(TicketListView {
            tickets,
            filter,
            pagination,
            categories,
        })
    }

    pub async fn all_categories(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.categories.list_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Categories a new ticket may be filed under
    pub async fn active_categories(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.categories.list_all().await?;
        Ok(categories
            .into_iter()
            .filter(|c| c.is_active)
            .map(Into::into)
            .collect())
    }

    /// Open a ticket on behalf of the logged-in user
    pub async fn create(&self, dto: &CreateTicketDto, created_by: i32) -> Result<i32> {
        dto.validate()
            .map_err(|e| AppError::Validation(FormErrors::from(e)))?;

        let category_id = dto.category_id.ok_or_else(|| {
            AppError::Validation(FormErrors::field("category_id", "Category is required."))
        })?;

        let active = self.active_categories().await?;
        if !active.iter().any(|c| c.id == category_id) {
            return Err(AppError::Validation(FormErrors::field(
                "category_id",
                INACTIVE_CATEGORY_MESSAGE,
            )));
        }

        let ticket = NewTicket {
            title: dto.title.clone(),
            description: dto.description.clone(),
            category_id,
            created_by,
            status: STATUS_OPEN.to_string(),
            created_at: Utc::now(),
        };

        let id = self.tickets.insert(ticket).await?;
        tracing::info!("User {} created ticket {}", created_by, id);
        Ok(id)
    }

    /// Ticket with its comments, oldest comment first
    pub async fn details(&self, id: i32) -> Result<TicketDetailsView> {
        let ticket = self
            .tickets
            .get_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;
        let comments = self.tickets.get_comments(id).await?;

        Ok(TicketDetailsView {
            is_closed: ticket.is_closed(),
            ticket,
            comments,
        })
    }

    pub async fn add_comment(
        &self,
        ticket_id: i32,
        dto: &AddCommentDto,
        created_by: i32,
    ) -> Result<()> {
        if self.tickets.get_details(ticket_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Ticket {} not found", ticket_id)));
        }

        dto.validate()
            .map_err(|e| AppError::Validation(FormErrors::from(e)))?;

        let comment = NewComment {
            ticket_id,
            comment_text: dto.new_comment_text.clone(),
            created_by,
            created_at: Utc::now(),
        };

        if !self.tickets.add_comment(comment).await? {
            return Err(AppError::Validation(FormErrors::form(CLOSED_TICKET_MESSAGE)));
        }

        tracing::info!("User {} commented on ticket {}", created_by, ticket_id);
        Ok(())
    }

    /// Soft delete; unknown or already deleted tickets are ignored
    pub async fn delete(&self, id: i32) -> Result<()> {
        if self.tickets.soft_delete(id).await? {
            tracing::info!("Deleted ticket {}", id);
        }
        Ok(())
    }

    /// Replace the free-text status of a non-deleted ticket
    pub async fn update_status(&self, id: i32, dto: &UpdateStatusDto) -> Result<()> {
        let status = dto.status.trim();
        let trimmed = UpdateStatusDto {
            status: status.to_string(),
        };
        trimmed
            .validate()
            .map_err(|e| AppError::Validation(FormErrors::from(e)))?;

        if status.chars().count() > MAX_STATUS_LENGTH {
            return Err(AppError::Validation(FormErrors::field(
                "status",
                format!("Status must be at most {} characters.", MAX_STATUS_LENGTH),
            )));
        }

        if !self.tickets.update_status(id, status).await? {
            return Err(AppError::NotFound(format!("Ticket {} not found", id)));
        }

        tracing::info!("Ticket {} status set to {}", id, status);
        Ok(())
    }
}
