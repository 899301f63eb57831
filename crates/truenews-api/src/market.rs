use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use truenews_types::api::{
    CreateMarketItemRequest, CreatedResponse, MarketItem, MarketListResponse, OkResponse,
};

use crate::auth::AppState;
use crate::error::ApiError;

/// Only active items: soft-deleted rows must never surface here.
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .db
        .list_active_market_items()
        .map_err(ApiError::internal)?;

    let items = rows
        .into_iter()
        .map(|row| MarketItem {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            seller_id: row.seller_id,
            seller_name: row.seller_name,
            status: row.status,
            views: row.views,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(MarketListResponse {
        success: true,
        items,
    }))
}

/// seller_id and seller_name come from the request body unverified; the
/// role-play frontend is trusted with identity here. See DESIGN.md.
pub async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateMarketItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let id = state
        .db
        .insert_market_item(
            &req.name,
            &req.description,
            &req.price,
            &req.category,
            req.seller_id,
            &req.seller_name,
        )
        .map_err(ApiError::internal)?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { success: true, id })))
}

/// Soft delete; repeated or unknown ids are still a success.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .soft_delete_market_item(id)
        .map_err(ApiError::internal)?;
    Ok(Json(OkResponse { success: true }))
}
