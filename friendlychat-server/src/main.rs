use anyhow::Context;
use std::sync::Arc;

use friendlychat_server::{connect_pool, logging, routes, run_migrations, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing()?;

    let config = ServerConfig::from_env()?;
    tracing::info!(database_url = %config.database_url, "using database");

    let pool = connect_pool(&config.database_url).await.context("connect to sqlite")?;
    run_migrations(&pool).await.context("run migrations")?;

    let state = Arc::new(AppState::new(pool));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("bind tcp listener")?;
    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("server shutdown")?;

    Ok(())
}
