//! MongoDB-backed wishlist store
//!
//! Reads and writes the `users`, `products` and `productreviews`
//! collections. Product cards come from a single aggregation pipeline.

use super::models::{ProductSummary, SummaryImage, User, WishlistUpdate};
use super::store::{StoreError, StoreResult, WishlistStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Client, Collection, Database,
};
use serde::Deserialize;
use tracing::debug;

const USERS: &str = "users";
const PRODUCTS: &str = "products";
const REVIEWS: &str = "productreviews";

#[derive(Debug, Deserialize)]
struct UserDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    wishlist: Vec<ObjectId>,
}

impl From<UserDoc> for User {
    fn from(doc: UserDoc) -> Self {
        User {
            id: doc.id.to_hex(),
            wishlist: doc.wishlist.into_iter().map(ObjectId::to_hex).collect(),
        }
    }
}

/// One output document of the product pipeline
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    image: SummaryImage,
    name: Option<String>,
    slug: Option<String>,
    colors: Option<Vec<String>>,
    discount: Option<f64>,
    likes: Option<f64>,
    price_sale: Option<f64>,
    price: Option<f64>,
    average_rating: Option<f64>,
    vendor: Option<Bson>,
    shop: Option<Bson>,
    created_at: Option<bson::DateTime>,
}

impl From<ProductRow> for ProductSummary {
    fn from(row: ProductRow) -> Self {
        ProductSummary {
            id: row.id.to_hex(),
            image: row.image,
            name: row.name,
            slug: row.slug,
            colors: row.colors,
            discount: row.discount,
            likes: row.likes.map(|l| l as i64),
            price_sale: row.price_sale,
            price: row.price,
            average_rating: row.average_rating,
            vendor: row.vendor.and_then(reference_id),
            shop: row.shop.and_then(reference_id),
            created_at: row
                .created_at
                .and_then(|d| DateTime::<Utc>::from_timestamp_millis(d.timestamp_millis())),
        }
    }
}

/// Renders a stored reference as a string id.
fn reference_id(value: Bson) -> Option<String> {
    match value {
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::String(s) => Some(s),
        _ => None,
    }
}

fn object_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Match, join reviews, derive rating and first image, project the card.
pub fn product_pipeline(ids: Vec<ObjectId>) -> Vec<Document> {
    vec![
        doc! { "$match": { "_id": { "$in": ids } } },
        doc! {
            "$lookup": {
                "from": REVIEWS,
                "localField": "reviews",
                "foreignField": "_id",
                "as": "reviews",
            }
        },
        doc! {
            "$addFields": {
                "averageRating": { "$avg": "$reviews.rating" },
                "image": { "$arrayElemAt": ["$images", 0] },
            }
        },
        doc! {
            "$project": {
                "image": { "url": "$image.url", "blurDataURL": "$image.blurDataURL" },
                "name": 1,
                "slug": 1,
                "colors": 1,
                "discount": 1,
                "likes": 1,
                "priceSale": 1,
                "price": 1,
                "averageRating": 1,
                "vendor": 1,
                "shop": 1,
                "createdAt": 1,
            }
        },
    ]
}

pub struct MongoStore {
    users: Collection<UserDoc>,
    products: Collection<Document>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection(USERS),
            products: db.collection(PRODUCTS),
        }
    }

    /// Connects to `uri` and opens `database`.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(&client.database(database)))
    }

    async fn conditional_update(
        &self,
        filter: Document,
        update: Document,
        user_id: ObjectId,
    ) -> StoreResult<WishlistUpdate> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        if let Some(doc) = self
            .users
            .find_one_and_update(filter, update, options)
            .await?
        {
            return Ok(WishlistUpdate {
                changed: true,
                wishlist: User::from(doc).wishlist,
            });
        }

        // The predicate did not match: either another request already made the
        // change or the user is gone.
        let current = self
            .users
            .find_one(doc! { "_id": user_id }, None)
            .await?
            .ok_or_else(|| StoreError::InvalidId(user_id.to_hex()))?;

        Ok(WishlistUpdate {
            changed: false,
            wishlist: User::from(current).wishlist,
        })
    }
}

#[async_trait]
impl WishlistStore for MongoStore {
    async fn find_user(&self, user_id: &str) -> StoreResult<Option<User>> {
        let oid = object_id(user_id)?;
        let doc = self.users.find_one(doc! { "_id": oid }, None).await?;
        Ok(doc.map(User::from))
    }

    async fn wishlist_products(&self, ids: &[String]) -> StoreResult<Vec<ProductSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let oids = ids
            .iter()
            .map(|id| object_id(id))
            .collect::<StoreResult<Vec<_>>>()?;

        let mut cursor = self.products.aggregate(product_pipeline(oids), None).await?;

        let mut summaries = Vec::with_capacity(ids.len());
        while let Some(doc) = cursor.try_next().await? {
            let row: ProductRow = bson::from_document(doc)?;
            summaries.push(row.into());
        }

        debug!(requested = ids.len(), found = summaries.len(), "Loaded wishlist products");
        Ok(summaries)
    }

    async fn add_to_wishlist(&self, user_id: &str, pid: &str) -> StoreResult<WishlistUpdate> {
        let uid = object_id(user_id)?;
        let pid = object_id(pid)?;

        self.conditional_update(
            doc! { "_id": uid, "wishlist": { "$ne": pid } },
            doc! { "$addToSet": { "wishlist": pid } },
            uid,
        )
        .await
    }

    async fn remove_from_wishlist(
        &self,
        user_id: &str,
        pid: &str,
    ) -> StoreResult<WishlistUpdate> {
        let uid = object_id(user_id)?;
        let pid = object_id(pid)?;

        self.conditional_update(
            doc! { "_id": uid, "wishlist": pid },
            doc! { "$pull": { "wishlist": pid } },
            uid,
        )
        .await
    }

    async fn adjust_likes(&self, pid: &str, delta: i64) -> StoreResult<bool> {
        let oid = object_id(pid)?;
        let result = self
            .products
            .update_one(doc! { "_id": oid }, doc! { "$inc": { "likes": delta } }, None)
            .await?;
        Ok(result.matched_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stages() {
        let id = ObjectId::new();
        let pipeline = product_pipeline(vec![id]);

        let stages: Vec<&str> = pipeline
            .iter()
            .filter_map(|stage| stage.keys().next().map(String::as_str))
            .collect();
        assert_eq!(stages, vec!["$match", "$lookup", "$addFields", "$project"]);

        let matched = pipeline[0]
            .get_document("$match")
            .and_then(|m| m.get_document("_id"))
            .and_then(|m| m.get_array("$in"))
            .unwrap();
        assert_eq!(matched, &vec![Bson::ObjectId(id)]);

        let lookup = pipeline[1].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "productreviews");
    }

    #[test]
    fn test_row_decodes_into_summary() {
        let id = ObjectId::new();
        let vendor = ObjectId::new();
        let row: ProductRow = bson::from_document(doc! {
            "_id": id,
            "image": { "url": "https://cdn/a.jpg" },
            "name": "Desk Lamp",
            "likes": 3_i32,
            "price": 30_i32,
            "averageRating": Bson::Null,
            "vendor": vendor,
            "createdAt": bson::DateTime::from_millis(1_700_000_000_000),
        })
        .unwrap();

        let summary = ProductSummary::from(row);
        assert_eq!(summary.id, id.to_hex());
        assert_eq!(summary.likes, Some(3));
        assert_eq!(summary.price, Some(30.0));
        assert_eq!(summary.average_rating, None);
        assert_eq!(summary.vendor, Some(vendor.to_hex()));
        assert_eq!(
            summary.created_at.map(|d| d.timestamp_millis()),
            Some(1_700_000_000_000)
        );
    }

    #[test]
    fn test_user_doc_ids_become_hex_strings() {
        let (uid, p1, p2) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        let doc: UserDoc = bson::from_document(doc! {
            "_id": uid,
            "wishlist": [p1, p2],
        })
        .unwrap();

        let user = User::from(doc);
        assert_eq!(user.id, uid.to_hex());
        assert_eq!(user.wishlist, vec![p1.to_hex(), p2.to_hex()]);
    }

    #[test]
    fn test_row_with_absent_or_null_fields() {
        let id = ObjectId::new();
        let row: ProductRow = bson::from_document(doc! {
            "_id": id,
            "image": {},
            "colors": Bson::Null,
            "name": Bson::Null,
        })
        .unwrap();

        let json = serde_json::to_value(ProductSummary::from(row)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "_id": id.to_hex(),
                "image": {},
                "averageRating": null,
            })
        );
    }

    #[test]
    fn test_invalid_object_id() {
        assert!(matches!(
            object_id("not-an-id"),
            Err(StoreError::InvalidId(_))
        ));
    }
}
