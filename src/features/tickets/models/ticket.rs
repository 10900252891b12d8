use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::shared::constants::STATUS_CLOSED;

/// Whether a free-text status blocks new comments.
///
/// ASCII case-insensitive and untrimmed: "closed" and "CLOSED" match,
/// " Closed" does not.
pub fn is_closed_status(status: &str) -> bool {
    status.eq_ignore_ascii_case(STATUS_CLOSED)
}

/// Row of the ticket list
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketListItem {
    pub id: i32,
    pub title: String,
    pub status: String,
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: i32,
}

/// A single non-deleted ticket with its category name
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketDetails {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub status: String,
    pub created_by: i32,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TicketDetails {
    pub fn is_closed(&self) -> bool {
        is_closed_status(&self.status)
    }
}

/// Comment with its author's display name
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketComment {
    pub id: i32,
    pub ticket_id: i32,
    pub comment_text: String,
    pub created_by: i32,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub created_by: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub ticket_id: i32,
    pub comment_text: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

/// Optional predicates of the ticket list, conjoined with "not deleted".
///
/// Blank search or status text is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<i32>,
}

impl TicketFilter {
    pub fn new(search: Option<String>, status: Option<String>, category_id: Option<i32>) -> Self {
        Self {
            search: search.filter(|s| !s.trim().is_empty()),
            status: status.filter(|s| !s.trim().is_empty()),
            category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_status_ignores_ascii_case() {
        assert!(is_closed_status("Closed"));
        assert!(is_closed_status("closed"));
        assert!(is_closed_status("CLOSED"));
        assert!(!is_closed_status("Open"));
        assert!(!is_closed_status(" Closed"));
        assert!(!is_closed_status(""));
    }

    #[test]
    fn test_blank_filters_are_absent() {
        let filter = TicketFilter::new(Some("   ".to_string()), Some(String::new()), None);
        assert_eq!(filter, TicketFilter::default());

        let filter = TicketFilter::new(Some("vpn".to_string()), Some("Open".to_string()), Some(3));
        assert_eq!(filter.search.as_deref(), Some("vpn"));
        assert_eq!(filter.status.as_deref(), Some("Open"));
        assert_eq!(filter.category_id, Some(3));
    }
}
