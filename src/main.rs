use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use livefit::logging::init_tracing;
use livefit::router::init_router;
use livefit::state::init_app_state;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("failed to initialise logging")?;

    let state = init_app_state().await?;

    sqlx::migrate!("./migrations")
        .run(&state.db)
        .await
        .context("failed to run database migrations")?;
    info!("database migrations applied");

    let app = init_router(state)?;

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "server running");
    info!("Swagger UI available at http://localhost:{port}/swagger-ui");
    info!("Scalar UI available at http://localhost:{port}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
