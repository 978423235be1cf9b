/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use momsquad_api::{app::AppState, config::Config};
/// use momsquad_shared::store::StoreClient;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let store = StoreClient::new(&config.store.url, &config.store.service_key)?;
/// let state = AppState::new(store, config);
/// let app = momsquad_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use momsquad_shared::store::StoreClient;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor. This is the
/// only process-wide state: the store handle, a plain HTTP client for the
/// identity provider, and the configuration loaded at startup.
#[derive(Clone)]
pub struct AppState {
    /// Hosted store client
    pub store: StoreClient,

    /// HTTP client for the identity provider (token exchange, JWKS)
    pub http: reqwest::Client,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: StoreClient, config: Config) -> Self {
        Self {
            store,
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// GET  /                              # liveness probe
/// GET  /test                          # probe
/// POST /create-user                   # register a user
/// POST /login                         # username/password login
/// GET  /users                         # list users (full rows)
/// GET  /users/search?q=               # search by first name
/// GET  /users/:user_id                # password-free profile
/// POST /create-squad                  # create squad + creator membership
/// GET  /squads                        # list squads
/// GET  /squads/:squad_id/members      # memberships with user details
/// GET  /squad-memberships?squad_id=   # list memberships
/// POST /create-squad-membership       # join a squad
/// GET  /auth/google/callback          # OAuth redirect target
/// ```
///
/// # Middleware
///
/// Request logging (tower-http `TraceLayer`) and permissive CORS: any
/// origin, method, and header, with preflight OPTIONS answered by the layer
/// before any handler runs.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/", get(routes::health::root))
        .route("/test", get(routes::health::test_probe))
        .route("/create-user", post(routes::users::create_user))
        .route("/login", post(routes::auth::login))
        .route("/users", get(routes::users::list_users))
        .route("/users/search", get(routes::users::search_users))
        .route("/users/:user_id", get(routes::users::get_user))
        .route("/create-squad", post(routes::squads::create_squad))
        .route("/squads", get(routes::squads::list_squads))
        .route(
            "/squads/:squad_id/members",
            get(routes::squads::list_squad_members),
        )
        .route(
            "/squad-memberships",
            get(routes::memberships::list_memberships),
        )
        .route(
            "/create-squad-membership",
            post(routes::memberships::create_membership),
        )
        .route("/auth/google/callback", get(routes::auth::google_callback))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
