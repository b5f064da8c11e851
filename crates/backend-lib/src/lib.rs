// ============================
// ticklist-backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the ticklist task-tracking server.

pub mod auth;
pub mod category;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod todo;
pub mod user;

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::MemoryStorage;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Token issue/verify service
    pub tokens: TokenService,
    /// Settings loaded at startup
    pub settings: Arc<Settings>,
    /// Storage backend
    pub storage: S,
}

impl<S> AppState<S> {
    /// Create a new application state
    pub fn new(storage: S, settings: Settings) -> Self {
        let tokens = TokenService::new(&settings.jwt);
        Self {
            tokens,
            settings: Arc::new(settings),
            storage,
        }
    }
}

impl AppState<MemoryStorage> {
    /// Create a new application state with default settings and an
    /// in-process store
    pub fn new_default() -> Result<Self, AppError> {
        let settings = Settings::default();
        Ok(Self::new(MemoryStorage::new(), settings))
    }
}
