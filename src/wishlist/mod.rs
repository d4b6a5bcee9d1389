//! Wishlist Domain Module
//!
//! - Domain models (users, products, reviews, response envelopes)
//! - Business logic helpers (membership, rating, card projection)
//! - Store seam with MongoDB and in-memory implementations
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use state::{AppState, SharedState};
pub use store::{DynStore, StoreError, WishlistStore};
