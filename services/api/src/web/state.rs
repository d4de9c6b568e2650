//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the registry of interactive sessions.

use crate::config::Config;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;
use video_summarizer_core::{InteractionController, SessionState};

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: InteractionController,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(config: Arc<Config>, controller: InteractionController) -> Self {
        Self {
            config,
            controller,
            sessions: Arc::new(SessionRegistry::default()),
        }
    }
}

//=========================================================================================
// SessionRegistry (One SessionState per Interactive Session)
//=========================================================================================

/// A handle to one session's state.
///
/// The lock is held for the whole duration of a user action, so actions on the
/// same session run one at a time.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Owns every live session. Sessions never share a `SessionState`.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionRegistry {
    /// Starts a new session with a fresh, idle state.
    pub async fn create(&self) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(session_id, Arc::new(Mutex::new(SessionState::new())));
        session_id
    }

    pub async fn get(&self, session_id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    /// Terminates a session, dropping its state. Returns `false` if it did not exist.
    pub async fn remove(&self, session_id: Uuid) -> bool {
        self.sessions.write().await.remove(&session_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
