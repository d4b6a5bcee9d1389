//! Persistence seam for the wishlist
//!
//! Handlers only talk to [`WishlistStore`]. [`MongoStore`](super::mongo::MongoStore)
//! backs production, [`MemoryStore`](super::memory::MemoryStore) backs local
//! runs and tests.

use super::models::{ProductSummary, User, WishlistUpdate};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// The driver reported a failure
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),

    /// A stored document did not have the expected shape
    #[error("Failed to decode document: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    /// An identifier could not be used as a document key
    #[error("Invalid id: {0}")]
    InvalidId(String),
}

impl StoreError {
    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Database(_) => "database",
            StoreError::Decode(_) => "decode",
            StoreError::InvalidId(_) => "invalid_id",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations behind the wishlist endpoints
#[async_trait]
pub trait WishlistStore: Send + Sync {
    /// Loads a user by id.
    async fn find_user(&self, user_id: &str) -> StoreResult<Option<User>>;

    /// Returns the card for every id in `ids` that resolves to a product.
    async fn wishlist_products(&self, ids: &[String]) -> StoreResult<Vec<ProductSummary>>;

    /// Adds `pid` to the wishlist unless it is already there.
    async fn add_to_wishlist(&self, user_id: &str, pid: &str) -> StoreResult<WishlistUpdate>;

    /// Removes `pid` from the wishlist if it is there.
    async fn remove_from_wishlist(&self, user_id: &str, pid: &str)
        -> StoreResult<WishlistUpdate>;

    /// Moves the product's like counter by `delta`. Returns `false` when no
    /// product has that id.
    async fn adjust_likes(&self, pid: &str, delta: i64) -> StoreResult<bool>;
}

/// Shared handle to the configured store
pub type DynStore = Arc<dyn WishlistStore>;
