use crate::core::SwipeSession;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Shared handle to one session; the lock is held for a single transition
pub type SessionHandle = Arc<Mutex<SwipeSession>>;

/// In-memory session store
///
/// Sessions expire after `ttl_secs` without access. Nothing is persisted,
/// so a restart drops every session.
#[derive(Clone)]
pub struct SessionStore {
    sessions: moka::future::Cache<Uuid, SessionHandle>,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(max_sessions: u64, ttl_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(ttl_secs))
            .build();

        Self { sessions }
    }

    /// Register a session and return its id
    pub async fn insert(&self, session: SwipeSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Arc::new(Mutex::new(session)))
            .await;

        tracing::trace!("Session stored: {}", id);
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let handle = self.sessions.get(id).await;
        if handle.is_none() {
            tracing::trace!("Session miss: {}", id);
        }
        handle
    }

    /// Drop a session; returns whether it existed
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).await.is_some()
    }

    /// Approximate number of live sessions
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
