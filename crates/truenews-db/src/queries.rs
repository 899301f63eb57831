use crate::Database;
use crate::models::{
    ChatMessageRow, DarkwebUserRow, GangRow, MarketItemRow, NewsRow, StatsRow, UserRow,
};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users (news site) --

    pub fn create_user(&self, username: &str, password_hash: &str, role: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
                (username, password_hash, role),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Darkweb users --

    pub fn create_darkweb_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO darkweb_users (username, password_hash) VALUES (?1, ?2)",
                (username, password_hash),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_darkweb_user_by_username(&self, username: &str) -> Result<Option<DarkwebUserRow>> {
        self.with_conn(|conn| query_darkweb_user_by_username(conn, username))
    }

    pub fn touch_darkweb_last_login(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE darkweb_users SET last_login = CURRENT_TIMESTAMP WHERE id = ?1",
                [id],
            )?;
            Ok(())
        })
    }

    // -- Invite links --

    /// Mark an invite link used, recording the redeemer. A single UPDATE
    /// guarded by `used = 0` makes redemption atomic: the second caller
    /// affects zero rows. Returns true if this call redeemed the link.
    pub fn redeem_invite(&self, link: &str, used_by: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE invite_links SET used = 1, used_by = ?2 WHERE link = ?1 AND used = 0",
                (link, used_by),
            )?;
            Ok(affected > 0)
        })
    }

    // -- News --

    pub fn insert_news(
        &self,
        title: &str,
        category: &str,
        preview: &str,
        content: &str,
        author: &str,
        date: &str,
        time: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO news (title, category, preview, content, author, date, time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                (title, category, preview, content, author, date, time),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_news(&self) -> Result<Vec<NewsRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, category, preview, content, author, date, time, created_at
                 FROM news ORDER BY id DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(NewsRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        category: row.get(2)?,
                        preview: row.get(3)?,
                        content: row.get(4)?,
                        author: row.get(5)?,
                        date: row.get(6)?,
                        time: row.get(7)?,
                        created_at: row.get(8)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Hard delete. Zero rows affected is not an error; deleting an
    /// absent id is treated as success (idempotent delete).
    pub fn delete_news(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM news WHERE id = ?1", [id])?;
            Ok(affected)
        })
    }

    // -- Market items --

    pub fn insert_market_item(
        &self,
        name: &str,
        description: &str,
        price: &str,
        category: &str,
        seller_id: i64,
        seller_name: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO market_items (name, description, price, category, seller_id, seller_name)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                (name, description, price, category, seller_id, seller_name),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_active_market_items(&self) -> Result<Vec<MarketItemRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, description, price, category, seller_id, seller_name,
                        status, views, created_at
                 FROM market_items WHERE status = 'active' ORDER BY id DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(MarketItemRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                        price: row.get(3)?,
                        category: row.get(4)?,
                        seller_id: row.get(5)?,
                        seller_name: row.get(6)?,
                        status: row.get(7)?,
                        views: row.get(8)?,
                        created_at: row.get(9)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Soft delete: flips status to 'deleted', never removes the row.
    pub fn soft_delete_market_item(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE market_items SET status = 'deleted' WHERE id = ?1",
                [id],
            )?;
            Ok(affected)
        })
    }

    // -- Gangs --

    pub fn create_gang(
        &self,
        name: &str,
        territory: &str,
        leader_id: i64,
        leader_name: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO gangs (name, territory, leader_id, leader_name)
                 VALUES (?1, ?2, ?3, ?4)",
                (name, territory, leader_id, leader_name),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_gangs(&self) -> Result<Vec<GangRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT g.id, g.name, g.territory, g.leader_id, g.leader_name,
                        g.reputation, COUNT(gm.id) AS members, g.created_at
                 FROM gangs g
                 LEFT JOIN gang_members gm ON g.id = gm.gang_id
                 GROUP BY g.id",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(GangRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        territory: row.get(2)?,
                        leader_id: row.get(3)?,
                        leader_name: row.get(4)?,
                        reputation: row.get(5)?,
                        members: row.get(6)?,
                        created_at: row.get(7)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn add_gang_member(&self, gang_id: i64, user_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO gang_members (gang_id, user_id) VALUES (?1, ?2)",
                (gang_id, user_id),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    // -- Item chats --

    pub fn insert_chat_message(
        &self,
        item_id: i64,
        buyer_id: i64,
        seller_id: i64,
        message: &str,
        sender: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chats (item_id, buyer_id, seller_id, message, sender)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (item_id, buyer_id, seller_id, message, sender),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_chat_for_item(&self, item_id: i64) -> Result<Vec<ChatMessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, item_id, buyer_id, seller_id, message, sender, created_at
                 FROM chats WHERE item_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt
                .query_map([item_id], |row| {
                    Ok(ChatMessageRow {
                        id: row.get(0)?,
                        item_id: row.get(1)?,
                        buyer_id: row.get(2)?,
                        seller_id: row.get(3)?,
                        message: row.get(4)?,
                        sender: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Lawyer orders --

    pub fn insert_lawyer_order(
        &self,
        service_name: &str,
        client_name: &str,
        client_email: &str,
        client_phone: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO lawyer_orders (service_name, client_name, client_email, client_phone)
                 VALUES (?1, ?2, ?3, ?4)",
                (service_name, client_name, client_email, client_phone),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    // -- Admin stats --

    pub fn stats(&self) -> Result<StatsRow> {
        self.with_conn(|conn| {
            let count = |sql: &str| -> std::result::Result<i64, rusqlite::Error> {
                conn.query_row(sql, [], |row| row.get(0))
            };
            Ok(StatsRow {
                users: count("SELECT COUNT(*) FROM users")?,
                darkweb_users: count("SELECT COUNT(*) FROM darkweb_users")?,
                news: count("SELECT COUNT(*) FROM news")?,
                market_items: count("SELECT COUNT(*) FROM market_items WHERE status = 'active'")?,
                gangs: count("SELECT COUNT(*) FROM gangs")?,
            })
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, role, created_at FROM users WHERE username = ?1",
    )?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                role: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_darkweb_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<DarkwebUserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, role, reputation, balance, created_at, last_login
         FROM darkweb_users WHERE username = ?1",
    )?;

    let row = stmt
        .query_row([username], |row| {
            Ok(DarkwebUserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                role: row.get(3)?,
                reputation: row.get(4)?,
                balance: row.get(5)?,
                created_at: row.get(6)?,
                last_login: row.get(7)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
