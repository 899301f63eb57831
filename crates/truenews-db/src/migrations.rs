use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Seed data version. Bumping this would allow a future seed step; the
/// marker lives in SQLite's user_version pragma so that seeding happens
/// exactly once, even if every seeded row is later deleted.
const SEEDED_VERSION: i64 = 1;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            username        TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            role            TEXT NOT NULL DEFAULT 'user',
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS news (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            category    TEXT NOT NULL,
            preview     TEXT NOT NULL,
            content     TEXT NOT NULL,
            author      TEXT NOT NULL,
            date        TEXT NOT NULL,
            time        TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS darkweb_users (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            username        TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            role            TEXT NOT NULL DEFAULT 'user',
            reputation      INTEGER NOT NULL DEFAULT 0,
            balance         INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            last_login      TEXT
        );

        CREATE TABLE IF NOT EXISTS market_items (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            description TEXT NOT NULL,
            price       TEXT NOT NULL,
            category    TEXT NOT NULL,
            seller_id   INTEGER NOT NULL REFERENCES darkweb_users(id),
            seller_name TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'active',
            views       INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS gangs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            territory   TEXT NOT NULL,
            leader_id   INTEGER NOT NULL REFERENCES darkweb_users(id),
            leader_name TEXT NOT NULL,
            reputation  INTEGER NOT NULL DEFAULT 100,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS gang_members (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            gang_id     INTEGER NOT NULL REFERENCES gangs(id),
            user_id     INTEGER NOT NULL REFERENCES darkweb_users(id),
            joined_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS chats (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id     INTEGER NOT NULL REFERENCES market_items(id),
            buyer_id    INTEGER NOT NULL,
            seller_id   INTEGER NOT NULL,
            message     TEXT NOT NULL,
            sender      TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS lawyer_orders (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            service_name    TEXT NOT NULL,
            client_name     TEXT NOT NULL,
            client_email    TEXT NOT NULL,
            client_phone    TEXT NOT NULL,
            status          TEXT NOT NULL DEFAULT 'pending',
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS invite_links (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            link        TEXT NOT NULL UNIQUE,
            used        INTEGER NOT NULL DEFAULT 0,
            used_by     TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    seed(conn)?;

    info!("Database migrations complete");
    Ok(())
}

/// Insert the fixed launch content: two news articles and three invite
/// links. Gated on user_version rather than row counts, so a later bulk
/// deletion does not trigger a re-seed on restart.
fn seed(conn: &Connection) -> Result<()> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if version >= SEEDED_VERSION {
        return Ok(());
    }

    let articles = [
        (
            "Tragedy in the city center",
            "Incidents",
            "A tragic event unfolded downtown this afternoon...",
            "Full report on the tragedy in the city center. Police are working the scene.",
            "admin",
            "24.10.2025",
            "10:00",
        ),
        (
            "City council debates the budget",
            "Politics",
            "The session covered the main spending priorities...",
            "Details of the city council budget discussion.",
            "admin",
            "24.10.2025",
            "09:30",
        ),
    ];
    for (title, category, preview, content, author, date, time) in articles {
        conn.execute(
            "INSERT INTO news (title, category, preview, content, author, date, time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (title, category, preview, content, author, date, time),
        )?;
    }

    let invites = [
        "https://invite.to/rp-market/phantom666",
        "https://invite.to/rp-market/shadow2025",
        "https://invite.to/rp-market/elite999",
    ];
    for link in invites {
        conn.execute("INSERT INTO invite_links (link) VALUES (?1)", [link])?;
    }

    conn.pragma_update(None, "user_version", SEEDED_VERSION)?;

    info!("Seeded initial news and invite links");
    Ok(())
}
