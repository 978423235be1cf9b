//! # MomSquad API Server
//!
//! HTTP façade over the hosted data store, exposing user, squad, and
//! membership endpoints plus the Google OAuth callback.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p momsquad-api
//! ```

use momsquad_api::{
    app::{build_router, AppState},
    config::Config,
};
use momsquad_shared::store::StoreClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "momsquad_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "MomSquad API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let store = StoreClient::new(&config.store.url, &config.store.service_key)?;

    let bind_address = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
