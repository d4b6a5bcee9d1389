//! REST API handlers for the wishlist
//!
//! `GET /api/wishlist` returns the product cards of the current user's
//! wishlist. `POST /api/wishlist` toggles one product in or out of it.

use super::{helpers::contains_product, models::*, state::SharedState};
use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{debug, info, warn};

/// Creates routes for wishlist operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/api/wishlist", get(get_wishlist).post(toggle_wishlist))
}

/// Endpoint: GET /api/wishlist
async fn get_wishlist(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<WishlistResponse>> {
    let data = if user.wishlist.is_empty() {
        Vec::new()
    } else {
        state.store.wishlist_products(&user.wishlist).await?
    };

    debug!(user_id = %user.id, items = data.len(), "Fetched wishlist");

    Ok(Json(WishlistResponse {
        success: true,
        data,
    }))
}

/// Endpoint: POST /api/wishlist
///
/// Adds `pid` when it is absent (201, `pushed`) and removes it when present
/// (200, `pulled`). The returned list is the stored state after the write.
async fn toggle_wishlist(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<ToggleInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ToggleResponse>)> {
    let Json(input) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let pid = input.pid.trim();
    if pid.is_empty() {
        return Err(ApiError::InvalidBody("pid is required".to_string()));
    }

    let (kind, update) = if contains_product(&user.wishlist, pid) {
        let update = state.store.remove_from_wishlist(&user.id, pid).await?;
        (ToggleKind::Pulled, update)
    } else {
        let update = state.store.add_to_wishlist(&user.id, pid).await?;
        (ToggleKind::Pushed, update)
    };

    if update.changed {
        let delta = match kind {
            ToggleKind::Pushed => 1,
            ToggleKind::Pulled => -1,
        };
        if !state.store.adjust_likes(pid, delta).await? {
            warn!(product_id = %pid, "Wishlist toggled for a product that does not exist");
        }
    } else {
        debug!(user_id = %user.id, product_id = %pid, "Wishlist already up to date");
    }

    info!(user_id = %user.id, product_id = %pid, kind = ?kind, "Wishlist toggled");

    let status = match kind {
        ToggleKind::Pushed => StatusCode::CREATED,
        ToggleKind::Pulled => StatusCode::OK,
    };

    Ok((status, Json(ToggleResponse::new(kind, update.wishlist))))
}
