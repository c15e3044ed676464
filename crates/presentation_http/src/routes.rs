//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::propagate_request_id, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Settings API
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).post(handlers::settings::save_settings),
        )
        // Search API
        .route("/api/search", post(handlers::search::search))
        // API documentation
        .merge(openapi::create_openapi_routes())
        .with_state(state)
}

/// CORS layer: permissive without configured origins, restricted otherwise
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Wrap the router with the HTTP middleware stack
///
/// Order (outermost first): request id, trace, CORS, body limit.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    let router = router.layer(RequestBodyLimitLayer::new(config.max_body_size_json_bytes));

    let router = if config.cors_enabled {
        router.layer(cors_layer(config))
    } else {
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(propagate_request_id))
}

/// Router with routes and middleware, as served by the binary
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    with_middleware(create_router(state), config)
}
