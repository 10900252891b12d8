//! In-memory stores and an assembled test app.
//!
//! The stores follow the same rules as the PostgreSQL implementations
//! (ordering, unique names and emails, soft delete, closed-ticket guard) so
//! services and handlers can be exercised without a database.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderValue;
use axum_test::TestServer;
use chrono::Utc;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use tokio::sync::RwLock;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::core::router::{build_router, AppServices};
use crate::core::session::{SessionStore, SessionUser};
use crate::features::categories::models::{Category, NewCategory};
use crate::features::categories::services::CategoryStore;
use crate::features::tickets::models::{
    is_closed_status, NewComment, NewTicket, TicketComment, TicketDetails, TicketFilter,
    TicketListItem,
};
use crate::features::tickets::services::TicketStore;
use crate::features::users::models::{NewUser, User, UserCredentials};
use crate::features::users::services::password::hash_password;
use crate::features::users::services::UserStore;

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<StoredUser>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn users(&self) -> Vec<User> {
        self.users
            .read()
            .await
            .iter()
            .map(|u| u.user.clone())
            .collect()
    }

    pub async fn password_hash_of(&self, email: &str) -> Option<String> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.user.email == email)
            .map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.user.email == email)
            .map(|u| UserCredentials {
                id: u.user.id,
                full_name: u.user.full_name.clone(),
                password_hash: u.password_hash.clone(),
                is_active: u.user.is_active,
            }))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.users.read().await.iter().any(|u| u.user.email == email))
    }

    async fn insert(&self, user: NewUser) -> Result<i32> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.user.email == user.email) {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }

        let id = users.len() as i32 + 1;
        users.push(StoredUser {
            user: User {
                id,
                full_name: user.full_name,
                email: user.email,
                is_active: user.is_active,
                created_at: user.created_at,
            },
            password_hash: user.password_hash,
        });
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let mut users = self.users().await;
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(users)
    }
}

/// Insert a user with a digested password and return its id
pub async fn seed_user(
    store: &InMemoryUserStore,
    full_name: &str,
    email: &str,
    password: &str,
    is_active: bool,
) -> i32 {
    store
        .insert(NewUser {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password),
            is_active,
            created_at: Utc::now(),
        })
        .await
        .unwrap()
}

// =============================================================================
// CATEGORIES
// =============================================================================

#[derive(Default)]
pub struct InMemoryCategoryStore {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn name_of(&self, id: i32) -> Option<String> {
        self.categories
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn list_all(&self) -> Result<Vec<Category>> {
        let mut categories = self.categories.read().await.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn name_exists(&self, name: &str) -> Result<bool> {
        Ok(self.categories.read().await.iter().any(|c| c.name == name))
    }

    async fn insert(&self, category: NewCategory) -> Result<i32> {
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c.name == category.name) {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }

        let id = categories.len() as i32 + 1;
        categories.push(Category {
            id,
            name: category.name,
            is_active: category.is_active,
            created_at: category.created_at,
        });
        Ok(id)
    }

    async fn toggle_active(&self, id: i32) -> Result<bool> {
        let mut categories = self.categories.write().await;
        match categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.is_active = !category.is_active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Insert an active category and return its id
pub async fn seed_category(store: &InMemoryCategoryStore, name: &str) -> i32 {
    store
        .insert(NewCategory {
            name: name.to_string(),
            is_active: true,
            created_at: Utc::now(),
        })
        .await
        .unwrap()
}

// =============================================================================
// TICKETS
// =============================================================================

#[derive(Debug, Clone)]
struct StoredTicket {
    id: i32,
    ticket: NewTicket,
    is_deleted: bool,
}

impl StoredTicket {
    /// Same predicate as the SQL WHERE clause (ILIKE search, exact status and category)
    fn matches(&self, filter: &TicketFilter) -> bool {
        let t = &self.ticket;
        let search_ok = filter.search.as_deref().is_none_or(|search| {
            let needle = search.to_lowercase();
            t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        });
        let status_ok = filter.status.as_deref().is_none_or(|s| s == t.status);
        let category_ok = filter.category_id.is_none_or(|id| id == t.category_id);

        !self.is_deleted && search_ok && status_ok && category_ok
    }
}

#[derive(Default)]
struct TicketData {
    tickets: Vec<StoredTicket>,
    comments: Vec<TicketComment>,
}

#[derive(Default)]
pub struct InMemoryTicketStore {
    data: RwLock<TicketData>,
    categories: Option<Arc<InMemoryCategoryStore>>,
}

impl InMemoryTicketStore {
    /// Resolve category names the way the SQL LEFT JOIN does
    pub fn with_categories(categories: Arc<InMemoryCategoryStore>) -> Self {
        Self {
            data: RwLock::default(),
            categories: Some(categories),
        }
    }

    /// Stored rows, soft-deleted ones included
    pub async fn len(&self) -> usize {
        self.data.read().await.tickets.len()
    }

    pub async fn comment_count(&self) -> usize {
        self.data.read().await.comments.len()
    }

    async fn category_name(&self, id: i32) -> Option<String> {
        match &self.categories {
            Some(categories) => categories.name_of(id).await,
            None => None,
        }
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn count_filtered(&self, filter: &TicketFilter) -> Result<i64> {
        let data = self.data.read().await;
        Ok(data.tickets.iter().filter(|t| t.matches(filter)).count() as i64)
    }

    async fn list_filtered(
        &self,
        filter: &TicketFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TicketListItem>> {
        let mut matching: Vec<StoredTicket> = {
            let data = self.data.read().await;
            data.tickets
                .iter()
                .filter(|t| t.matches(filter))
                .cloned()
                .collect()
        };
        matching.sort_by(|a, b| (b.ticket.created_at, b.id).cmp(&(a.ticket.created_at, a.id)));

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        let mut items = Vec::new();
        for t in matching.into_iter().skip(offset).take(limit) {
            items.push(TicketListItem {
                id: t.id,
                category_name: self.category_name(t.ticket.category_id).await,
                title: t.ticket.title,
                status: t.ticket.status,
                created_at: t.ticket.created_at,
                created_by: t.ticket.created_by,
            });
        }
        Ok(items)
    }

    async fn get_details(&self, id: i32) -> Result<Option<TicketDetails>> {
        let found = {
            let data = self.data.read().await;
            data.tickets
                .iter()
                .find(|t| t.id == id && !t.is_deleted)
                .cloned()
        };

        let Some(t) = found else {
            return Ok(None);
        };

        Ok(Some(TicketDetails {
            id: t.id,
            category_name: self.category_name(t.ticket.category_id).await,
            title: t.ticket.title,
            description: t.ticket.description,
            category_id: t.ticket.category_id,
            status: t.ticket.status,
            created_by: t.ticket.created_by,
            created_by_name: None,
            created_at: t.ticket.created_at,
        }))
    }

    async fn get_comments(&self, ticket_id: i32) -> Result<Vec<TicketComment>> {
        let data = self.data.read().await;
        let mut comments: Vec<TicketComment> = data
            .comments
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(comments)
    }

    async fn add_comment(&self, comment: NewComment) -> Result<bool> {
        let mut data = self.data.write().await;

        let open = data.tickets.iter().any(|t| {
            t.id == comment.ticket_id && !t.is_deleted && !is_closed_status(&t.ticket.status)
        });
        if !open {
            return Ok(false);
        }

        let id = data.comments.len() as i32 + 1;
        data.comments.push(TicketComment {
            id,
            ticket_id: comment.ticket_id,
            comment_text: comment.comment_text,
            created_by: comment.created_by,
            created_by_name: None,
            created_at: comment.created_at,
        });
        Ok(true)
    }

    async fn insert(&self, ticket: NewTicket) -> Result<i32> {
        let mut data = self.data.write().await;
        let id = data.tickets.len() as i32 + 1;
        data.tickets.push(StoredTicket {
            id,
            ticket,
            is_deleted: false,
        });
        Ok(id)
    }

    async fn soft_delete(&self, id: i32) -> Result<bool> {
        let mut data = self.data.write().await;
        match data.tickets.iter_mut().find(|t| t.id == id && !t.is_deleted) {
            Some(t) => {
                t.is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        match data.tickets.iter_mut().find(|t| t.id == id && !t.is_deleted) {
            Some(t) => {
                t.ticket.status = status.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Open ticket with generated text
pub fn fake_ticket(category_id: i32, created_by: i32) -> NewTicket {
    NewTicket {
        title: Sentence(2..5).fake(),
        description: Paragraph(1..3).fake(),
        category_id,
        created_by,
        status: "Open".to_string(),
        created_at: Utc::now(),
    }
}

// =============================================================================
// TEST APP
// =============================================================================

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "Admin123!";

/// The full router over in-memory stores, with one active admin user
pub struct TestApp {
    pub server: TestServer,
    pub users: Arc<InMemoryUserStore>,
    pub categories: Arc<InMemoryCategoryStore>,
    pub tickets: Arc<InMemoryTicketStore>,
    pub sessions: Arc<SessionStore>,
    pub admin_id: i32,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_session_config(SessionConfig::default()).await
    }

    pub async fn with_session_config(config: SessionConfig) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let categories = Arc::new(InMemoryCategoryStore::new());
        let tickets = Arc::new(InMemoryTicketStore::with_categories(categories.clone()));
        let sessions = Arc::new(SessionStore::new(config));

        let admin_id = seed_user(&users, "Admin", ADMIN_EMAIL, ADMIN_PASSWORD, true).await;

        let services = AppServices::new(
            users.clone(),
            categories.clone(),
            tickets.clone(),
            sessions.clone(),
        );
        let server = TestServer::new(build_router(services, 1024 * 1024)).unwrap();

        Self {
            server,
            users,
            categories,
            tickets,
            sessions,
            admin_id,
        }
    }

    /// `Cookie` header value of a fresh session for the admin user
    pub async fn session_cookie(&self) -> HeaderValue {
        let id = self
            .sessions
            .create(SessionUser {
                user_id: self.admin_id,
                full_name: "Admin".to_string(),
            })
            .await;
        HeaderValue::from_str(&format!("{}={}", self.sessions.cookie_name(), id)).unwrap()
    }
}
