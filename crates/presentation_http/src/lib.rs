//! HTTP presentation layer for the affiliate search service
//!
//! Exposes the settings and search use cases over a JSON API, together
//! with health probes and OpenAPI documentation.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use middleware::{RequestId, ValidatedJson, ValidationError};
pub use routes::{create_app, create_router};
pub use state::AppState;
