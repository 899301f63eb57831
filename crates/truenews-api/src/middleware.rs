use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use truenews_types::api::Claims;

use crate::error::ApiError;

/// Fallback for local development only; production sets
/// TRUENEWS_JWT_SECRET so that sessions survive restarts.
pub const DEV_SECRET: &str = "dev-secret-change-me";

pub fn secret_from_env() -> String {
    std::env::var("TRUENEWS_JWT_SECRET").unwrap_or_else(|_| DEV_SECRET.into())
}

/// Extract and validate JWT from Authorization header.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization token"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Missing authorization token"))?;

    let secret = secret_from_env();

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}

/// Role guard for the admin surfaces. Runs after require_auth, which
/// put the validated claims into request extensions.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| ApiError::unauthorized("Missing authorization token"))?;

    if claims.role != "admin" {
        return Err(ApiError::forbidden("Admin privileges required"));
    }

    Ok(next.run(req).await)
}
