/// Database row types — these map directly to SQLite rows.
/// Distinct from truenews-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

pub struct DarkwebUserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub reputation: i64,
    pub balance: i64,
    pub created_at: String,
    pub last_login: Option<String>,
}

pub struct NewsRow {
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

pub struct MarketItemRow {
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

/// Gang plus its membership count, as returned by the listing query.
pub struct GangRow {
    pub id: i64,
    pub name: String,
    pub territory: String,
    pub leader_id: i64,
    pub leader_name: String,
    pub reputation: i64,
    pub members: i64,
    pub created_at: String,
}

pub struct ChatMessageRow {
    pub id: i64,
    pub item_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub message: String,
    pub sender: String,
    pub created_at: String,
}

pub struct StatsRow {
    pub users: i64,
    pub darkweb_users: i64,
    pub news: i64,
    pub market_items: i64,
    pub gangs: i64,
}
