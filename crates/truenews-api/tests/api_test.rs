use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use truenews_api::auth::{AppState, AppStateInner};
use truenews_api::middleware::secret_from_env;
use truenews_api::router::router;
use truenews_db::Database;

fn test_app() -> Router {
    let state: AppState = Arc::new(AppStateInner {
        db: Database::open_in_memory().unwrap(),
        jwt_secret: secret_from_env(),
    });
    router(state)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn admin_token(app: &Router) -> String {
    let (status, _) = request(
        app,
        "POST",
        "/api/register",
        Some(json!({"username": "root", "password": "rootpw", "role": "admin"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        app,
        "POST",
        "/api/login",
        Some(json!({"username": "root", "password": "rootpw"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_twice_conflicts() {
    let app = test_app();

    let (status, body) = request(
        &app,
        "POST",
        "/api/register",
        Some(json!({"username": "alice", "password": "pw1"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["username"], json!("alice"));

    let (status, body) = request(
        &app,
        "POST",
        "/api/register",
        Some(json!({"username": "alice", "password": "other"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn empty_fields_rejected_with_field_name() {
    let app = test_app();

    let (status, body) = request(
        &app,
        "POST",
        "/api/register",
        Some(json!({"username": "", "password": "pw"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("username is required"));

    let (status, body) = request(
        &app,
        "POST",
        "/api/register",
        Some(json!({"username": "alice", "password": ""})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("password is required"));

    let (status, body) = request(
        &app,
        "POST",
        "/api/darkweb/register",
        Some(json!({"username": "alice", "password": ""})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("password is required"));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = test_app();

    request(
        &app,
        "POST",
        "/api/register",
        Some(json!({"username": "alice", "password": "pw1"})),
        None,
    )
    .await;

    let (s1, b1) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({"username": "alice", "password": "wrong"})),
        None,
    )
    .await;
    let (s2, b2) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({"username": "nobody", "password": "pw1"})),
        None,
    )
    .await;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(b1, b2, "wrong password and unknown user must look identical");
}

#[tokio::test]
async fn login_returns_stored_role() {
    let app = test_app();

    request(
        &app,
        "POST",
        "/api/register",
        Some(json!({"username": "ed", "password": "pw", "role": "editor"})),
        None,
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({"username": "ed", "password": "pw"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], json!("ed"));
    assert_eq!(body["user"]["role"], json!("editor"));
    assert!(body["token"].as_str().is_some());
}

/// The concrete role-play scenario: register, log in, fail a login,
/// redeem a seeded invite once.
#[tokio::test]
async fn darkweb_scenario() {
    let app = test_app();

    let (status, body) = request(
        &app,
        "POST",
        "/api/darkweb/register",
        Some(json!({"username": "alice", "password": "pw1"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert!(body["user_id"].as_i64().is_some());

    let (status, body) = request(
        &app,
        "POST",
        "/api/darkweb/login",
        Some(json!({"username": "alice", "password": "pw1"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["reputation"], json!(0));
    assert_eq!(body["user"]["role"], json!("user"));

    let (status, _) = request(
        &app,
        "POST",
        "/api/darkweb/login",
        Some(json!({"username": "alice", "password": "wrong"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let invite = json!({
        "link": "https://invite.to/rp-market/phantom666",
        "username": "alice"
    });
    let (status, body) = request(&app, "POST", "/api/darkweb/verify-invite", Some(invite.clone()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, body) = request(&app, "POST", "/api/darkweb/verify-invite", Some(invite), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn news_admin_guard_and_ordering() {
    let app = test_app();

    let article = json!({
        "title": "Breaking", "category": "Local", "preview": "p",
        "content": "c", "author": "root", "date": "25.08.2026", "time": "12:00"
    });

    // No token, then a non-admin token
    let (status, _) = request(&app, "POST", "/api/news", Some(article.clone()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    request(
        &app,
        "POST",
        "/api/register",
        Some(json!({"username": "bob", "password": "pw"})),
        None,
    )
    .await;
    let (_, login) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({"username": "bob", "password": "pw"})),
        None,
    )
    .await;
    let user_token = login["token"].as_str().unwrap().to_string();
    let (status, _) = request(&app, "POST", "/api/news", Some(article.clone()), Some(&user_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Admin path works
    let token = admin_token(&app).await;
    let mut ids = Vec::new();
    for i in 0..3 {
        let mut a = article.clone();
        a["title"] = json!(format!("Breaking {i}"));
        let (status, body) = request(&app, "POST", "/api/news", Some(a), Some(&token)).await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["id"].as_i64().unwrap());
    }

    // Newest first; the two seeded articles trail
    let (status, body) = request(&app, "GET", "/api/news", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<i64> = body["news"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect();
    ids.reverse();
    assert_eq!(&listed[..3], ids.as_slice());
    assert_eq!(listed.len(), 5);

    // Idempotent delete
    let uri = format!("/api/news/{}", ids[0]);
    let (status, body) = request(&app, "DELETE", &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let (status, body) = request(&app, "DELETE", &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn news_creation_with_missing_field_is_client_error() {
    let app = test_app();
    let token = admin_token(&app).await;

    // No title field at all: rejected before reaching the database
    let (status, _) = request(
        &app,
        "POST",
        "/api/news",
        Some(json!({"category": "Local"})),
        Some(&token),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn market_soft_delete_flow() {
    let app = test_app();

    let (_, reg) = request(
        &app,
        "POST",
        "/api/darkweb/register",
        Some(json!({"username": "vendor", "password": "pw"})),
        None,
    )
    .await;
    let seller_id = reg["user_id"].as_i64().unwrap();

    let (status, body) = request(
        &app,
        "POST",
        "/api/market/items",
        Some(json!({
            "name": "Encrypted phone", "description": "clean", "price": "500 credits",
            "category": "hardware", "seller_id": seller_id, "seller_name": "vendor"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = body["id"].as_i64().unwrap();

    let (_, body) = request(&app, "GET", "/api/market/items", None, None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["status"], json!("active"));

    let uri = format!("/api/market/items/{item_id}");
    let (status, _) = request(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(&app, "GET", "/api/market/items", None, None).await;
    assert!(body["items"].as_array().unwrap().is_empty());

    // Second delete of the same id is still a success
    let (status, body) = request(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn gang_creation_and_duplicate_name() {
    let app = test_app();

    let (_, reg) = request(
        &app,
        "POST",
        "/api/darkweb/register",
        Some(json!({"username": "boss", "password": "pw"})),
        None,
    )
    .await;
    let leader_id = reg["user_id"].as_i64().unwrap();

    let gang = json!({
        "name": "Phantoms", "territory": "Docks",
        "leader_id": leader_id, "leader_name": "boss"
    });
    let (status, _) = request(&app, "POST", "/api/gangs", Some(gang.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(&app, "POST", "/api/gangs", Some(gang), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));

    // Fresh gang lists with zero members and default reputation
    let (_, body) = request(&app, "GET", "/api/gangs", None, None).await;
    let gangs = body["gangs"].as_array().unwrap();
    assert_eq!(gangs.len(), 1);
    assert_eq!(gangs[0]["members"], json!(0));
    assert_eq!(gangs[0]["reputation"], json!(100));
}

#[tokio::test]
async fn admin_stats_counts() {
    let app = test_app();
    let token = admin_token(&app).await;

    // Guard first: no token, then a valid token without the admin role
    let (status, _) = request(&app, "GET", "/api/admin/stats", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    request(
        &app,
        "POST",
        "/api/register",
        Some(json!({"username": "bob", "password": "pw"})),
        None,
    )
    .await;
    let (_, login) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({"username": "bob", "password": "pw"})),
        None,
    )
    .await;
    let user_token = login["token"].as_str().unwrap().to_string();
    let (status, _) = request(&app, "GET", "/api/admin/stats", None, Some(&user_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    request(
        &app,
        "POST",
        "/api/darkweb/register",
        Some(json!({"username": "vendor", "password": "pw"})),
        None,
    )
    .await;

    let (status, body) = request(&app, "GET", "/api/admin/stats", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["users"], json!(2)); // the admin plus bob
    assert_eq!(body["stats"]["darkweb_users"], json!(1));
    assert_eq!(body["stats"]["news"], json!(2)); // seeded articles
    assert_eq!(body["stats"]["market_items"], json!(0));
    assert_eq!(body["stats"]["gangs"], json!(0));
}
