use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use truenews_db::is_unique_violation;
use truenews_types::api::{CreateGangRequest, CreatedResponse, Gang, GangListResponse};

use crate::auth::AppState;
use crate::error::ApiError;

pub async fn list_gangs(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state.db.list_gangs().map_err(ApiError::internal)?;

    let gangs = rows
        .into_iter()
        .map(|row| Gang {
            id: row.id,
            name: row.name,
            territory: row.territory,
            leader_id: row.leader_id,
            leader_name: row.leader_name,
            reputation: row.reputation,
            members: row.members,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(GangListResponse {
        success: true,
        gangs,
    }))
}

pub async fn create_gang(
    State(state): State<AppState>,
    Json(req): Json<CreateGangRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    match state
        .db
        .create_gang(&req.name, &req.territory, req.leader_id, &req.leader_name)
    {
        Ok(id) => Ok((StatusCode::CREATED, Json(CreatedResponse { success: true, id }))),
        Err(e) if is_unique_violation(&e) => Err(ApiError::conflict("Gang name already taken")),
        Err(e) => Err(ApiError::internal(e)),
    }
}
