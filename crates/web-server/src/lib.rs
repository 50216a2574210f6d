use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use database::{AnalysisStore, DbRepository};
use narrator::{NarrativeGenerator, OpenAiNarrator};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod models;

/// The shared application state that all handlers can access.
///
/// Both collaborators are optional; handlers skip whichever is missing.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub store: Option<Arc<dyn AnalysisStore>>,
    pub narrator: Option<Arc<dyn NarrativeGenerator>>,
}

impl AppState {
    /// State with no persistence and no AI commentary.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            store: None,
            narrator: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn AnalysisStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrator = Some(narrator);
        self
    }
}

/// Builds the state from the settings, wiring up whichever collaborators are
/// configured. A database that cannot be reached is logged and left out.
pub async fn build_state(settings: Settings) -> AppState {
    let mut state = AppState::new(settings);

    if state.settings.database.url.is_some() {
        match connect_store(&state.settings).await {
            Ok(repo) => {
                tracing::info!("Persistence enabled.");
                state = state.with_store(Arc::new(repo));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Database unavailable; analyses will not be persisted.");
            }
        }
    } else {
        tracing::info!("No database configured; analyses will not be persisted.");
    }

    if let Some(narrator) = OpenAiNarrator::from_settings(&state.settings.ai) {
        tracing::info!(model = %state.settings.ai.model, "AI narrative enabled.");
        state = state.with_narrator(Arc::new(narrator));
    }

    state
}

async fn connect_store(settings: &Settings) -> Result<DbRepository, database::DbError> {
    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    Ok(DbRepository::new(db_pool))
}

/// Defines the application routes and middleware.
pub fn app_router(state: Arc<AppState>) -> Router {
    let body_limit = state.settings.server.body_limit_bytes;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/v1/analyze", post(handlers::analyze))
        .route("/v1/metrics", post(handlers::metrics))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let app_state = Arc::new(build_state(settings).await);
    let app = app_router(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("pyra-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
