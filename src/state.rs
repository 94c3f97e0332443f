//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::session::{MemorySessionStore, SessionStore};
use crate::store::ContentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: ContentStore, config: AppConfig) -> Self {
        let sessions: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::new(config.session_ttl()));
        Self {
            store,
            sessions,
            config: Arc::new(config),
        }
    }
}
