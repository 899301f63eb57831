use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};

use truenews_db::{Database, is_unique_violation};
use truenews_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SessionUser};

use crate::error::ApiError;
use crate::password;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

/// One message for both unknown-user and wrong-password, so callers
/// cannot enumerate accounts.
const BAD_CREDENTIALS: &str = "Invalid username or password";

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }
    if req.password.is_empty() {
        return Err(ApiError::bad_request("password is required"));
    }

    let role = req.role.as_deref().unwrap_or("user");

    if state
        .db
        .get_user_by_username(username)
        .map_err(ApiError::internal)?
        .is_some()
    {
        return Err(ApiError::conflict("Username already exists"));
    }

    let password_hash = password::hash_password(&req.password).map_err(ApiError::internal)?;

    match state.db.create_user(username, &password_hash, role) {
        Ok(_) => Ok(Json(RegisterResponse {
            success: true,
            username: username.to_string(),
        })),
        // Backstop for a registration race on the same name
        Err(e) if is_unique_violation(&e) => Err(ApiError::conflict("Username already exists")),
        Err(e) => Err(ApiError::internal(e)),
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_user_by_username(&req.username)
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    let token = create_token(&state.jwt_secret, user.id, &user.username, &user.role)
        .map_err(ApiError::internal)?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: SessionUser {
            username: user.username,
            role: user.role,
        },
    }))
}

fn create_token(secret: &str, user_id: i64, username: &str, role: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role: role.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
