//! Wishlist Business Logic Helpers
//!
//! Pure functions shared by the store implementations and the handlers.

use super::models::{Product, ProductImage, ProductReview, ProductSummary, SummaryImage};

/// Returns `true` when `pid` is already on the wishlist.
///
/// Ids are compared as strings, so an ObjectId and its hex form match.
pub fn contains_product<S: AsRef<str>>(wishlist: &[S], pid: &str) -> bool {
    wishlist.iter().any(|id| id.as_ref() == pid)
}

/// Arithmetic mean of the given ratings, `None` for an empty input.
pub fn average_rating<I>(ratings: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0.0, 0u32), |(sum, count), r| (sum + r, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

/// Reduces the first product image to the card fields. No image gives an
/// empty `SummaryImage`.
pub fn first_image(images: &[ProductImage]) -> SummaryImage {
    images
        .first()
        .map(|img| SummaryImage {
            url: Some(img.url.clone()),
            blur_data_url: img.blur_data_url.clone(),
        })
        .unwrap_or_default()
}

/// Builds the wishlist card for `product`.
///
/// `reviews` is whatever the caller resolved from `product.reviews`; ids that
/// did not resolve are simply missing from it.
pub fn summarize(product: &Product, reviews: &[ProductReview]) -> ProductSummary {
    ProductSummary {
        id: product.id.clone(),
        image: first_image(&product.images),
        name: Some(product.name.clone()),
        slug: Some(product.slug.clone()),
        colors: Some(product.colors.clone()),
        discount: product.discount,
        likes: Some(product.likes),
        price_sale: product.price_sale,
        price: Some(product.price),
        average_rating: average_rating(reviews.iter().map(|r| r.rating)),
        vendor: product.vendor.clone(),
        shop: product.shop.clone(),
        created_at: Some(product.created_at),
    }
}
