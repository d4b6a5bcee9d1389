//! In-memory wishlist store
//!
//! Keeps users, products and reviews in `DashMap`s so the service can run
//! without a database. Conditional wishlist writes hold the user's entry lock
//! for the read-modify-write.

use super::helpers::{contains_product, summarize};
use super::models::{Product, ProductReview, ProductSummary, User, WishlistUpdate};
use super::store::{StoreError, StoreResult, WishlistStore};
use async_trait::async_trait;
use dashmap::DashMap;

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    products: DashMap<String, Product>,
    reviews: DashMap<String, ProductReview>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn insert_product(&self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn insert_review(&self, review: ProductReview) {
        self.reviews.insert(review.id.clone(), review);
    }

    /// Current like counter of a product
    pub fn likes(&self, pid: &str) -> Option<i64> {
        self.products.get(pid).map(|p| p.likes)
    }

    fn update_wishlist<F>(&self, user_id: &str, apply: F) -> StoreResult<WishlistUpdate>
    where
        F: FnOnce(&mut Vec<String>) -> bool,
    {
        let mut user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::InvalidId(user_id.to_string()))?;

        let changed = apply(&mut user.wishlist);

        Ok(WishlistUpdate {
            changed,
            wishlist: user.wishlist.clone(),
        })
    }
}

#[async_trait]
impl WishlistStore for MemoryStore {
    async fn find_user(&self, user_id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.get(user_id).map(|u| u.clone()))
    }

    async fn wishlist_products(&self, ids: &[String]) -> StoreResult<Vec<ProductSummary>> {
        let summaries = ids
            .iter()
            .filter_map(|id| self.products.get(id))
            .map(|product| {
                let reviews: Vec<ProductReview> = product
                    .reviews
                    .iter()
                    .filter_map(|rid| self.reviews.get(rid).map(|r| r.clone()))
                    .collect();
                summarize(&product, &reviews)
            })
            .collect();

        Ok(summaries)
    }

    async fn add_to_wishlist(&self, user_id: &str, pid: &str) -> StoreResult<WishlistUpdate> {
        self.update_wishlist(user_id, |wishlist| {
            if contains_product(wishlist.as_slice(), pid) {
                false
            } else {
                wishlist.push(pid.to_string());
                true
            }
        })
    }

    async fn remove_from_wishlist(
        &self,
        user_id: &str,
        pid: &str,
    ) -> StoreResult<WishlistUpdate> {
        self.update_wishlist(user_id, |wishlist| {
            let before = wishlist.len();
            wishlist.retain(|id| id != pid);
            wishlist.len() != before
        })
    }

    async fn adjust_likes(&self, pid: &str, delta: i64) -> StoreResult<bool> {
        match self.products.get_mut(pid) {
            Some(mut product) => {
                product.likes += delta;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wishlist::models::ProductImage;
    use chrono::Utc;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_user(User {
            id: "u1".into(),
            wishlist: vec!["p1".into()],
        });
        for (id, reviews) in [("p1", vec!["r1", "r2"]), ("p2", vec![])] {
            store.insert_product(Product {
                id: id.into(),
                name: format!("Product {id}"),
                slug: id.into(),
                colors: Vec::new(),
                discount: None,
                likes: 0,
                price_sale: None,
                price: 20.0,
                vendor: None,
                shop: None,
                images: vec![ProductImage {
                    url: format!("https://cdn/{id}.jpg"),
                    blur_data_url: None,
                }],
                reviews: reviews.into_iter().map(String::from).collect(),
                created_at: Utc::now(),
            });
        }
        store.insert_review(ProductReview {
            id: "r1".into(),
            product: "p1".into(),
            rating: 4.0,
        });
        store.insert_review(ProductReview {
            id: "r2".into(),
            product: "p1".into(),
            rating: 2.0,
        });
        store
    }

    #[tokio::test]
    async fn test_add_is_conditional() {
        let store = seeded();

        let first = store.add_to_wishlist("u1", "p2").await.unwrap();
        assert!(first.changed);
        assert_eq!(first.wishlist, vec!["p1", "p2"]);

        let again = store.add_to_wishlist("u1", "p2").await.unwrap();
        assert!(!again.changed);
        assert_eq!(again.wishlist, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_remove_is_conditional() {
        let store = seeded();

        let removed = store.remove_from_wishlist("u1", "p1").await.unwrap();
        assert!(removed.changed);
        assert!(removed.wishlist.is_empty());

        let noop = store.remove_from_wishlist("u1", "p1").await.unwrap();
        assert!(!noop.changed);
    }

    #[tokio::test]
    async fn test_unknown_user_write_fails() {
        let store = seeded();
        let err = store.add_to_wishlist("ghost", "p1").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }

    #[tokio::test]
    async fn test_products_join_reviews_and_skip_dangling_ids() {
        let store = seeded();
        let ids = vec!["p1".to_string(), "missing".to_string()];

        let cards = store.wishlist_products(&ids).await.unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "p1");
        assert_eq!(cards[0].average_rating, Some(3.0));
        assert_eq!(cards[0].image.url.as_deref(), Some("https://cdn/p1.jpg"));
    }

    #[tokio::test]
    async fn test_adjust_likes() {
        let store = seeded();
        assert!(store.adjust_likes("p1", 1).await.unwrap());
        assert!(store.adjust_likes("p1", 1).await.unwrap());
        assert!(store.adjust_likes("p1", -1).await.unwrap());
        assert_eq!(store.likes("p1"), Some(1));
        assert!(!store.adjust_likes("missing", 1).await.unwrap());
    }
}
