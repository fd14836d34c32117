pub mod auth;
pub mod errors;
pub mod logging;
pub mod models;
pub mod routes;

use std::sync::Arc;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;
use crate::auth::TokenRegistry;
use crate::config::{AppConfig, CorsConfig};
use crate::db::Database;
use crate::errors::ReportError;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: Arc<TokenRegistry>,
    pub cors: CorsConfig,
}

pub async fn create_app_state(config: &AppConfig) -> Result<AppState, ReportError> {
    let db = Database::new(&config.database.path)?;
    let tokens = TokenRegistry::from_config(&config.auth)?;
    Ok(AppState {
        db,
        tokens: Arc::new(tokens),
        cors: config.cors.clone(),
    })
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/teams", get(routes::teams::list_teams))
        .route("/api/teams/new", post(routes::teams::create_team))
        .route("/api/reports/new", post(routes::reports::create_report))
        .route("/api/reports/{id}", get(routes::reports::get_report))
        .route("/api/reports/aggregated/{id}", get(routes::aggregated::get_aggregated_report))
        .route("/api/admin/teams/{id}", delete(routes::admin::delete_team))
        .route("/api/admin/reports/diagnostics", get(routes::admin::diagnostics))
        .route("/api/admin/reports/aggregated/new", post(routes::aggregated::create_aggregated_report))
        .route(
            "/api/admin/reports/aggregated/{id}",
            axum::routing::patch(routes::aggregated::update_aggregated_report)
                .delete(routes::aggregated::delete_aggregated_report),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::authenticate));

    let cors = cors_layer(&state.cors);

    Router::new()
        .route("/isalive", get(routes::health::is_alive))
        .route("/isready", get(routes::health::is_ready))
        .merge(api)
        .layer(cors)
        .layer(middleware::from_fn(logging::request_lifecycle))
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut origins = Vec::new();
    for host in &config.allowed_origins {
        for scheme in &config.allowed_schemes {
            match HeaderValue::from_str(&format!("{}://{}", scheme, host)) {
                Ok(origin) => origins.push(origin),
                Err(e) => warn!(host = %host, error = %e, "Skipping invalid CORS origin"),
            }
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
