use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use truenews_types::api::{
    CreateNewsRequest, CreatedResponse, NewsArticle, NewsListResponse, OkResponse,
};

use crate::auth::AppState;
use crate::error::ApiError;

pub async fn list_news(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state.db.list_news().map_err(ApiError::internal)?;

    let news = rows
        .into_iter()
        .map(|row| NewsArticle {
            id: row.id,
            title: row.title,
            category: row.category,
            preview: row.preview,
            content: row.content,
            author: row.author,
            date: row.date,
            time: row.time,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(NewsListResponse {
        success: true,
        news,
    }))
}

pub async fn create_news(
    State(state): State<AppState>,
    Json(req): Json<CreateNewsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }

    let id = state
        .db
        .insert_news(
            &req.title,
            &req.category,
            &req.preview,
            &req.content,
            &req.author,
            &req.date,
            &req.time,
        )
        .map_err(ApiError::internal)?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { success: true, id })))
}

/// Deleting an absent id still reports success (idempotent delete).
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.delete_news(id).map_err(ApiError::internal)?;
    Ok(Json(OkResponse { success: true }))
}
