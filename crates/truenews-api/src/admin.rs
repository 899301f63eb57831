use axum::{Json, extract::State, response::IntoResponse};

use truenews_types::api::{Stats, StatsResponse};

use crate::auth::AppState;
use crate::error::ApiError;

pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let row = state.db.stats().map_err(ApiError::internal)?;

    Ok(Json(StatsResponse {
        success: true,
        stats: Stats {
            users: row.users,
            darkweb_users: row.darkweb_users,
            news: row.news,
            market_items: row.market_items,
            gangs: row.gangs,
        },
    }))
}
