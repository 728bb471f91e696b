use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stocks_api::{
    config::Config,
    db::{self, PgStockRepository},
    routes,
    state::AppState,
};

const PORT: u16 = 8081;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stocks_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        max_connections = config.max_connections,
        statement_timeout_secs = config.statement_timeout.as_secs(),
        "Configuration loaded"
    );

    let pool = db::create_pool(&config).await?;
    tracing::info!("Connection to the database established");

    let state = AppState::new(PgStockRepository::new(pool, &config));
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], PORT));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Listening for connections");

    axum::serve(listener, app).await?;

    Ok(())
}
