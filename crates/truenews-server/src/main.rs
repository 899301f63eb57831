use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use truenews_api::auth::{AppState, AppStateInner};
use truenews_api::middleware::secret_from_env;
use truenews_api::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "truenews=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret = secret_from_env();
    let db_path = std::env::var("TRUENEWS_DB_PATH").unwrap_or_else(|_| "truenews.db".into());
    let host = std::env::var("TRUENEWS_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("TRUENEWS_PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()?;

    // Init database (creates the file, runs migrations and seed)
    let db = truenews_db::Database::open(&PathBuf::from(&db_path))?;

    let state: AppState = Arc::new(AppStateInner { db, jwt_secret });

    // Frontends are served elsewhere; the API allows any origin
    let app = router::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("TrueNews server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
