//! Wishlist State Management
//!
//! Application state shared by every request: the configured store and the
//! token secret used to resolve the current user.

use super::store::DynStore;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state
pub struct AppState {
    /// Backing store for users, products and reviews
    pub store: DynStore,

    /// HS256 secret that bearer tokens are verified with
    jwt_secret: String,
}

impl AppState {
    pub fn new(store: DynStore, jwt_secret: impl Into<String>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
