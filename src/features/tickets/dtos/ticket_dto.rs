use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::tickets::models::{TicketComment, TicketDetails, TicketFilter, TicketListItem};
use crate::shared::forms::lenient_option;
use crate::shared::types::Pagination;
use crate::shared::validation::validate_not_blank;

/// Query string of `GET /Tickets`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub page: Option<i64>,
}

impl TicketListQuery {
    pub fn filter(&self) -> TicketFilter {
        TicketFilter::new(self.search.clone(), self.status.clone(), self.category_id)
    }

    /// Requested page, 1 when absent
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// Form body for `POST /Tickets/Create`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketDto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Title is required."))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Description is required."))]
    pub description: String,

    /// Blank or unparseable input is left for the `required` rule to report
    #[serde(default, deserialize_with = "lenient_option")]
    #[validate(required(message = "Category is required."))]
    pub category_id: Option<i32>,
}

/// Form body for `POST /Tickets/AddComment/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentDto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Comment cannot be empty."))]
    pub new_comment_text: String,
}

/// Form body for `POST /Tickets/Delete`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteTicketDto {
    #[serde(default, deserialize_with = "lenient_option")]
    pub id: Option<i32>,
}

/// Form body for `POST /Tickets/UpdateStatus/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStatusDto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Status is required."))]
    pub status: String,
}

/// One page of the ticket list with everything the view echoes back
#[derive(Debug, Clone, Serialize)]
pub struct TicketListView {
    pub tickets: Vec<TicketListItem>,
    pub filter: TicketFilter,
    pub pagination: Pagination,
    /// All categories, inactive ones included, for the filter dropdown
    pub categories: Vec<CategoryResponseDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketDetailsView {
    pub ticket: TicketDetails,
    pub comments: Vec<TicketComment>,
    pub is_closed: bool,
}
