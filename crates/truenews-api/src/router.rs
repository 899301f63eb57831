use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::{self, AppState};
use crate::middleware::{require_admin, require_auth};
use crate::{admin, darkweb, gangs, market, news};

/// The full API surface. The admin routes sit behind the JWT + role
/// guards; everything else is open, matching the two-application split
/// (news site with sessions, darkweb role-play without).
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/news", get(news::list_news))
        .route("/api/darkweb/register", post(darkweb::register))
        .route("/api/darkweb/login", post(darkweb::login))
        .route("/api/darkweb/verify-invite", post(darkweb::verify_invite))
        .route(
            "/api/market/items",
            get(market::list_items).post(market::create_item),
        )
        .route("/api/market/items/{id}", delete(market::delete_item))
        .route("/api/gangs", get(gangs::list_gangs).post(gangs::create_gang))
        .with_state(state.clone());

    // require_auth runs first (outer layer), then the role check
    let admin_only = Router::new()
        .route("/api/news", post(news::create_news))
        .route("/api/news/{id}", delete(news::delete_news))
        .route("/api/admin/stats", get(admin::stats))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn(require_auth))
        .with_state(state);

    Router::new().merge(public).merge(admin_only)
}
