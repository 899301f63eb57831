use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use truenews_db::is_unique_violation;
use truenews_types::api::{
    DarkwebLoginRequest, DarkwebLoginResponse, DarkwebRegisterRequest, DarkwebRegisterResponse,
    DarkwebUser, OkResponse, VerifyInviteRequest,
};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::password;

/// Generic on purpose: invalid username and wrong password are not
/// distinguishable from the outside.
const BAD_CREDENTIALS: &str = "Invalid credentials";

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<DarkwebRegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }
    if req.password.is_empty() {
        return Err(ApiError::bad_request("password is required"));
    }

    if state
        .db
        .get_darkweb_user_by_username(username)
        .map_err(ApiError::internal)?
        .is_some()
    {
        return Err(ApiError::conflict("Username already exists"));
    }

    let password_hash = password::hash_password(&req.password).map_err(ApiError::internal)?;

    match state.db.create_darkweb_user(username, &password_hash) {
        Ok(user_id) => Ok((
            StatusCode::CREATED,
            Json(DarkwebRegisterResponse {
                success: true,
                user_id,
                username: username.to_string(),
            }),
        )),
        Err(e) if is_unique_violation(&e) => Err(ApiError::conflict("Username already exists")),
        Err(e) => Err(ApiError::internal(e)),
    }
}

/// Darkweb login deliberately issues no token: the role-play frontend
/// keeps the returned identity client-side and sends seller_id /
/// leader_id back with later requests. See DESIGN.md before changing.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<DarkwebLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_darkweb_user_by_username(&req.username)
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    // Separate statement from the credential read; a concurrent login
    // for the same account can only leave a stale timestamp.
    state
        .db
        .touch_darkweb_last_login(user.id)
        .map_err(ApiError::internal)?;

    Ok(Json(DarkwebLoginResponse {
        success: true,
        user: DarkwebUser {
            id: user.id,
            username: user.username,
            role: user.role,
            reputation: user.reputation,
        },
    }))
}

pub async fn verify_invite(
    State(state): State<AppState>,
    Json(req): Json<VerifyInviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.link.is_empty() {
        return Err(ApiError::bad_request("link is required"));
    }

    let used_by = req.username.as_deref().unwrap_or("unknown");

    let redeemed = state
        .db
        .redeem_invite(&req.link, used_by)
        .map_err(ApiError::internal)?;

    if !redeemed {
        // Same message whether the link never existed or was spent
        return Err(ApiError::bad_request("Invalid or already used invite link"));
    }

    Ok(Json(OkResponse { success: true }))
}
