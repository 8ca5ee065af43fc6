use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::cache::SnapshotCache;
use crate::propagate::Propagator;

use super::api::health as health_handlers;
use super::api::orbits as orbit_handlers;
use super::api::satellites as satellite_handlers;
use super::api::stream as stream_handlers;
use super::api_doc::ApiDoc;
use super::config::{Config, WebConfig};
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.web);

    Router::new()
        .route("/", get(health_handlers::root))
        .route("/status", get(health_handlers::status))
        .route("/satellites", get(satellite_handlers::list_satellites))
        .route("/satellite_orbits", get(orbit_handlers::satellite_orbit))
        .route(
            "/ws/satellite_positions",
            get(stream_handlers::satellite_positions),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &WebConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

pub async fn run_server(
    config: Config,
    cache: Arc<SnapshotCache>,
    propagator: Arc<dyn Propagator>,
) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let state = AppState {
        config: Arc::new(config),
        cache,
        propagator,
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
