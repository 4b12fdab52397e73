use backend::{api, service::GameService};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    dotenv::dotenv().ok();

    // Database Connection
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:webchess.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    let service = GameService::new(pool);
    service.init_schema().await?;

    let app = api::router(service);
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("chess API listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
