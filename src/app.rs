use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{any, get},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig, DEFAULT_ALLOWED_ORIGIN};
use crate::database::store::SharedStore;
use crate::handlers::drones;
use crate::middleware::preflight_no_content;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: SharedStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: SharedStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Catalog
        .merge(drones_routes())
        .with_state(state)
        // Global middleware
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
}

fn drones_routes() -> Router<AppState> {
    // Every method reaches dispatch so unmatched pairs get the JSON 400.
    Router::new()
        .route("/api/drones", any(drones::dispatch))
        .route("/api-drones.php", any(drones::dispatch))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origin = HeaderValue::from_str(&security.allowed_origin).unwrap_or_else(|_| {
        tracing::warn!(
            "Invalid allowed origin {:?}, falling back to {}",
            security.allowed_origin,
            DEFAULT_ALLOWED_ORIGIN
        );
        HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN)
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-requested-with")])
        .allow_credentials(security.allow_credentials)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Skysail Drones API",
            "version": version,
            "description": "Drones catalog admin endpoint",
            "endpoints": {
                "health": "/health",
                "drones": "/api/drones?action=list|create|update|delete",
                "legacy": "/api-drones.php",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
