//! Wishlist Domain Models
//!
//! Documents as the store hands them out, plus the request and response
//! shapes of the wishlist endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Stored Documents
// =============================================================================

/// A user as far as the wishlist cares about it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    /// Product ids in insertion order, each at most once
    #[serde(default)]
    pub wishlist: Vec<String>,
}

/// An image attached to a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductImage {
    pub url: String,

    #[serde(rename = "blurDataURL", default)]
    pub blur_data_url: Option<String>,
}

/// A product document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub price_sale: Option<f64>,
    pub price: f64,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub shop: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,

    /// Ids of `ProductReview` documents
    #[serde(default)]
    pub reviews: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A review left on a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductReview {
    #[serde(rename = "_id")]
    pub id: String,

    /// Back-reference to the reviewed product
    pub product: String,
    pub rating: f64,
}

// =============================================================================
// Responses
// =============================================================================

/// First image of a product, reduced to what the wishlist card renders.
///
/// Serializes as `{}` when the product has no image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SummaryImage {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,

    #[serde(
        rename = "blurDataURL",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub blur_data_url: Option<String>,
}

/// A wishlist entry enriched with product and review data.
///
/// Descriptive fields the product does not carry are left out of the JSON.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub image: SummaryImage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_sale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Mean review rating; `null` when the product has no reviews
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/wishlist`
#[derive(Debug, Deserialize)]
pub struct ToggleInput {
    /// Product to add or remove
    pub pid: String,
}

/// Which way a toggle went
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToggleKind {
    Pushed,
    Pulled,
}

impl ToggleKind {
    pub fn message(self) -> &'static str {
        match self {
            ToggleKind::Pushed => "Added To Wishlist",
            ToggleKind::Pulled => "Removed From Wishlist",
        }
    }
}

/// Response for `GET /api/wishlist`
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub success: bool,
    pub data: Vec<ProductSummary>,
}

/// Response for `POST /api/wishlist`
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,

    /// Wishlist ids after the write
    pub data: Vec<String>,

    #[serde(rename = "type")]
    pub kind: ToggleKind,
    pub message: String,
}

impl ToggleResponse {
    pub fn new(kind: ToggleKind, data: Vec<String>) -> Self {
        Self {
            success: true,
            data,
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// Outcome of a conditional wishlist write
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistUpdate {
    /// Whether the stored list actually changed
    pub changed: bool,

    /// The stored list after the write
    pub wishlist: Vec<String>,
}
