//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document and a Swagger UI.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for the affiliate search API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Affiliate Search API",
        description = "Stores Rakuten credentials and returns the cheapest matching items with affiliate links",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and readiness endpoints"),
        (name = "settings", description = "Upstream credential management"),
        (name = "search", description = "Keyword item search")
    ),
    paths(
        handlers::health::root,
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::settings::get_settings,
        handlers::settings::save_settings,
        handlers::search::search,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::StoreStatus,
            handlers::settings::SaveSettingsRequest,
            handlers::settings::SaveSettingsResponse,
            handlers::settings::SettingsResponse,
            handlers::search::SearchRequest,
            handlers::search::SearchResponse,
            handlers::search::SearchItem,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Routes serving the OpenAPI document and Swagger UI
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
