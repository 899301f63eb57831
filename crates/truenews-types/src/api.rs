use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// JWT claims shared between the auth handlers (token issuance) and the
/// middleware (token validation). Canonical definition lives here in
/// truenews-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub role: String,
    pub exp: usize,
}

// -- Auth (news site) --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: SessionUser,
}

// -- News --

#[derive(Debug, Serialize)]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub preview: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub time: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct NewsListResponse {
    pub success: bool,
    pub news: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateNewsRequest {
    pub title: String,
    pub category: String,
    pub preview: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub time: String,
}

/// Shared shape for creation endpoints returning the new row id.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub success: bool,
}

// -- Darkweb --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DarkwebRegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct DarkwebRegisterResponse {
    pub success: bool,
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DarkwebLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct DarkwebUser {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub reputation: i64,
}

#[derive(Debug, Serialize)]
pub struct DarkwebLoginResponse {
    pub success: bool,
    pub user: DarkwebUser,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyInviteRequest {
    pub link: String,
    #[serde(default)]
    pub username: Option<String>,
}

// -- Market --

#[derive(Debug, Serialize)]
pub struct MarketItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub seller_id: i64,
    pub seller_name: String,
    pub status: String,
    pub views: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct MarketListResponse {
    pub success: bool,
    pub items: Vec<MarketItem>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMarketItemRequest {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub seller_id: i64,
    pub seller_name: String,
}

// -- Gangs --

#[derive(Debug, Serialize)]
pub struct Gang {
    pub id: i64,
    pub name: String,
    pub territory: String,
    pub leader_id: i64,
    pub leader_name: String,
    pub reputation: i64,
    pub members: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct GangListResponse {
    pub success: bool,
    pub gangs: Vec<Gang>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGangRequest {
    pub name: String,
    pub territory: String,
    pub leader_id: i64,
    pub leader_name: String,
}

// -- Admin --

#[derive(Debug, Serialize)]
pub struct Stats {
    pub users: i64,
    pub darkweb_users: i64,
    pub news: i64,
    pub market_items: i64,
    pub gangs: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: Stats,
}
