mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

use std::sync::Arc;

use config::Config;
use state::AppState;
use store::EmployeeStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    tracing::info!("employees-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = EmployeeStore::from_config(&config).await?;

    let addr = config.bind_addr();

    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
