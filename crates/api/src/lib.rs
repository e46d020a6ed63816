//! # LabSlot API
//!
//! The API crate provides the web server for the LabSlot booking service:
//! account signup and login, and the slot-booking pages.
//!
//! ## Architecture
//!
//! - **Routes**: Define endpoints and URL structure
//! - **Handlers**: Turn requests into calls on the booking workflow
//! - **Middleware**: Sessions, authentication, flash messages and error mapping
//! - **Config**: Environment configuration
//!
//! Pages are served as JSON view models; form submissions answer with
//! `303 See Other` redirects, carrying any user-facing notice as a flash
//! message in the session.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication, sessions, and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue};
use eyre::Result;
use labslot_core::repositories::{AccountRepository, SlotRepository};
use labslot_db::{
    DbPool,
    memory::InMemoryStore,
    repositories::{PgAccountRepository, PgSlotRepository},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Account store
    pub accounts: Arc<dyn AccountRepository>,
    /// Slot store
    pub slots: Arc<dyn SlotRepository>,
}

impl ApiState {
    pub fn new(accounts: Arc<dyn AccountRepository>, slots: Arc<dyn SlotRepository>) -> Self {
        Self { accounts, slots }
    }

    /// State backed by PostgreSQL.
    pub fn postgres(pool: DbPool) -> Self {
        Self::new(
            Arc::new(PgAccountRepository::new(pool.clone())),
            Arc::new(PgSlotRepository::new(pool)),
        )
    }

    /// State backed by a fresh in-process store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store)
    }
}

/// Builds the application router with sessions, CORS, tracing and timeouts.
///
/// Sessions are kept in a process-local [`MemoryStore`]. An expired session is
/// rejected when it is next loaded, but its record is never evicted, so the
/// store grows with every distinct visitor until the process restarts.
pub fn app(state: Arc<ApiState>, config: &config::ApiConfig) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            config.session_inactivity_minutes,
        )));

    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Signup, login, logout and the home page
        .merge(routes::accounts::routes())
        // Slot booking pages and actions
        .merge(routes::booking::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(session_layer);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and state
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use labslot_api::{ApiState, config::ApiConfig, start_server};
///
/// let config = ApiConfig::from_env()?;
/// let pool = labslot_db::create_pool(&config.database_url).await?;
/// start_server(config, Arc::new(ApiState::postgres(pool))).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = app(state, &config);

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
