//! Server-side session storage for logged-in browsers.
//!
//! The browser only holds an opaque session id in a cookie; the identity lives
//! here. Sessions expire after a period without requests.

use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::RwLock;
use tower_cookies::cookie::SameSite;
use tower_cookies::Cookie;
use uuid::Uuid;

use crate::core::config::SessionConfig;

/// The authenticated user attached to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: i32,
    pub full_name: String,
}

struct SessionEntry {
    user: SessionUser,
    last_seen: Instant,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    config: SessionConfig,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("cookie_name", &self.config.cookie_name)
            .field("idle_timeout", &self.config.idle_timeout)
            .finish()
    }
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Start a new session and return its id. Expired sessions are purged.
    pub async fn create(&self, user: SessionUser) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let timeout = self.config.idle_timeout;

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= timeout);
        sessions.insert(
            id,
            SessionEntry {
                user,
                last_seen: now,
            },
        );

        id
    }

    /// Resolve a session id, refreshing its idle timer.
    ///
    /// Returns `None` for unknown or expired sessions; expired ones are removed.
    pub async fn get(&self, id: Uuid) -> Option<SessionUser> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let expired = match sessions.get_mut(&id) {
            None => return None,
            Some(entry) if now.duration_since(entry.last_seen) > self.config.idle_timeout => true,
            Some(entry) => {
                entry.last_seen = now;
                return Some(entry.user.clone());
            }
        };

        if expired {
            sessions.remove(&id);
            tracing::debug!("Session expired: {}", id);
        }
        None
    }

    /// Resolve the raw cookie value of a request
    pub async fn get_by_cookie_value(&self, value: &str) -> Option<SessionUser> {
        let id = Uuid::parse_str(value).ok()?;
        self.get(id).await
    }

    pub async fn destroy(&self, id: Uuid) {
        self.sessions.write().await.remove(&id);
    }

    /// Cookie carrying a freshly created session id
    pub fn session_cookie(&self, id: Uuid) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure)
            .build()
    }

    /// Cookie used to clear the session id in the browser
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), ""))
            .path("/")
            .build()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
