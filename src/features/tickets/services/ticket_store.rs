use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::tickets::models::{
    is_closed_status, NewComment, NewTicket, TicketComment, TicketDetails, TicketFilter,
    TicketListItem,
};

/// Persistence for tickets and their comments.
///
/// Soft-deleted tickets are invisible to every read and to comment and
/// status writes.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn count_filtered(&self, filter: &TicketFilter) -> Result<i64>;

    /// Most recent first (`created_at DESC, id DESC`)
    async fn list_filtered(
        &self,
        filter: &TicketFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TicketListItem>>;

    async fn get_details(&self, id: i32) -> Result<Option<TicketDetails>>;

    /// Oldest first
    async fn get_comments(&self, ticket_id: i32) -> Result<Vec<TicketComment>>;

    /// Insert the comment unless the ticket is missing, deleted or closed.
    /// Returns whether a row was written.
    async fn add_comment(&self, comment: NewComment) -> Result<bool>;

    async fn insert(&self, ticket: NewTicket) -> Result<i32>;

    async fn soft_delete(&self, id: i32) -> Result<bool>;

    async fn update_status(&self, id: i32, status: &str) -> Result<bool>;
}

/// Escape `%`, `_` and `\` so search text matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append the shared WHERE clause of the ticket list and its count
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TicketFilter) {
    builder.push(" WHERE t.is_deleted = FALSE");

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        builder
            .push(" AND (t.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR t.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(status) = &filter.status {
        builder.push(" AND t.status = ").push_bind(status.clone());
    }

    if let Some(category_id) = filter.category_id {
        builder.push(" AND t.category_id = ").push_bind(category_id);
    }
}

fn count_query(filter: &TicketFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM tickets t");
    push_filter(&mut builder, filter);
    builder
}

fn list_query(filter: &TicketFilter, offset: i64, limit: i64) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT t.id, t.title, t.status, c.name AS category_name, t.created_at, t.created_by \
         FROM tickets t LEFT JOIN categories c ON c.id = t.category_id",
    );
    push_filter(&mut builder, filter);
    builder
        .push(" ORDER BY t.created_at DESC, t.id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset.max(0));
    builder
}

pub struct PgTicketStore {
    pool: PgPool,
}

impl PgTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn count_filtered(&self, filter: &TicketFilter) -> Result<i64> {
        count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count tickets: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_filtered(
        &self,
        filter: &TicketFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TicketListItem>> {
        list_query(filter, offset, limit)
            .build_query_as::<TicketListItem>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list tickets: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get_details(&self, id: i32) -> Result<Option<TicketDetails>> {
        sqlx::query_as::<_, TicketDetails>(
            r#"
            SELECT t.id, t.title, t.description, t.category_id, c.name AS category_name,
                   t.status, t.created_by, u.full_name AS created_by_name, t.created_at
            FROM tickets t
            LEFT JOIN categories c ON c.id = t.category_id
            LEFT JOIN users u ON u.id = t.created_by
            WHERE t.id = $1 AND t.is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ticket {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn get_comments(&self, ticket_id: i32) -> Result<Vec<TicketComment>> {
        sqlx::query_as::<_, TicketComment>(
            r#"
            SELECT tc.id, tc.ticket_id, tc.comment_text, tc.created_by,
                   u.full_name AS created_by_name, tc.created_at
            FROM ticket_comments tc
            LEFT JOIN users u ON u.id = tc.created_by
            WHERE tc.ticket_id = $1
            ORDER BY tc.created_at ASC, tc.id ASC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get comments for ticket {}: {:?}", ticket_id, e);
            AppError::Database(e)
        })
    }

    async fn add_comment(&self, comment: NewComment) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        // Row lock serializes against concurrent status changes
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM tickets WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(comment.ticket_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to lock ticket {}: {:?}", comment.ticket_id, e);
            AppError::Database(e)
        })?;

        match status {
            Some(status) if !is_closed_status(&status) => {}
            _ => return Ok(false),
        }

        sqlx::query(
            r#"
            INSERT INTO ticket_comments (ticket_id, comment_text, created_by, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(comment.ticket_id)
        .bind(&comment.comment_text)
        .bind(comment.created_by)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert comment: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit comment: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(true)
    }

    async fn insert(&self, ticket: NewTicket) -> Result<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO tickets (title, description, category_id, created_by, status, created_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING id
            "#,
        )
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.category_id)
        .bind(ticket.created_by)
        .bind(&ticket.status)
        .bind(ticket.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert ticket: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn soft_delete(&self, id: i32) -> Result<bool> {
        let result =
            sqlx::query("UPDATE tickets SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete ticket {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE tickets SET status = $2 WHERE id = $1 AND is_deleted = FALSE")
                .bind(id)
                .bind(status)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to update status of ticket {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        Ok(result.rows_affected() > 0)
    }
}
