//! Search handler

use axum::{Json, extract::State};
use domain::SearchResultItem;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, not_blank},
    state::AppState,
};

/// Search request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SearchRequest {
    /// Free-text search keyword
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "keyword is required"))]
    pub keyword: String,
}

/// A single search result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchItem {
    pub name: String,
    /// Price in JPY
    pub price: u64,
    /// Item URL including the affiliate tag
    pub url: String,
}

impl From<SearchResultItem> for SearchItem {
    fn from(item: SearchResultItem) -> Self {
        Self {
            name: item.name,
            price: item.price,
            url: item.url,
        }
    }
}

/// Search response body, cheapest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
}

/// Search for the cheapest items matching a keyword
#[utoipa::path(
    post,
    path = "/api/search",
    tag = "search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Up to 10 items sorted by ascending price", body = SearchResponse),
        (status = 400, description = "Missing keyword or rejected application id", body = crate::error::ErrorResponse),
        (status = 500, description = "Settings missing, store or upstream failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(keyword = %request.keyword))]
pub async fn search(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let items = state.search_service.search(&request.keyword).await?;

    Ok(Json(SearchResponse {
        items: items.into_iter().map(SearchItem::from).collect(),
    }))
}
