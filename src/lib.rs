//! Wishlist Service Library
//!
//! HTTP endpoints for reading and toggling a shopper's wishlist, backed by
//! MongoDB or an in-memory store.

// Domain modules
pub mod wishlist;

// Infrastructure
pub mod auth;
pub mod config;
pub mod error;
pub mod router;
pub mod telemetry;
