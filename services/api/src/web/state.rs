//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use learnhub_core::ports::{Navigator, SessionStore};
use learnhub_core::{Catalog, CourseAdmin, LandingPages, Roster, SessionContext};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The store key for the session identified by a cookie token.
pub fn session_key(token: &str) -> String {
    format!("session:{}", token)
}

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub config: Arc<Config>,
    /// Read-only after the one-time load at startup.
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<dyn SessionStore>,
    pub roster: RwLock<Roster>,
    pub landing_pages: RwLock<LandingPages>,
    pub courses: RwLock<CourseAdmin>,
}

impl AppState {
    /// The session context for one cookie token.
    pub fn session(&self, token: &str, navigator: Arc<dyn Navigator>) -> SessionContext {
        SessionContext::new(self.sessions.clone(), navigator).with_key(session_key(token))
    }
}
