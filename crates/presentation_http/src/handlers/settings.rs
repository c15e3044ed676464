//! Settings handlers

use axum::{Json, extract::State};
use domain::SettingsRecord;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, not_blank},
    state::AppState,
};

/// Save settings request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    /// Upstream application id
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "applicationId is required"))]
    pub application_id: String,
    /// Affiliate tag appended to item URLs
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "affiliateTag is required"))]
    pub affiliate_tag: String,
    /// Optional application secret, stored as an empty string when omitted
    #[serde(default)]
    pub application_secret: Option<String>,
}

/// Stored settings; serializes to `{}` when nothing was saved
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_secret: Option<String>,
}

impl From<SettingsRecord> for SettingsResponse {
    fn from(record: SettingsRecord) -> Self {
        Self {
            application_id: Some(record.application_id().to_string()),
            affiliate_tag: Some(record.affiliate_tag().to_string()),
            application_secret: Some(record.application_secret().to_string()),
        }
    }
}

/// Save acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveSettingsResponse {
    pub success: bool,
}

/// Get the stored settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Stored settings, or an empty object", body = SettingsResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let record = state.settings_service.load().await?;
    Ok(Json(record.map(SettingsResponse::from).unwrap_or_default()))
}

/// Replace the stored settings
#[utoipa::path(
    post,
    path = "/api/settings",
    tag = "settings",
    request_body = SaveSettingsRequest,
    responses(
        (status = 200, description = "Settings saved", body = SaveSettingsResponse),
        (status = 400, description = "Missing field or malformed body", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn save_settings(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SaveSettingsRequest>,
) -> Result<Json<SaveSettingsResponse>, ApiError> {
    state
        .settings_service
        .save(
            &request.application_id,
            &request.affiliate_tag,
            request.application_secret.as_deref(),
        )
        .await?;

    Ok(Json(SaveSettingsResponse { success: true }))
}
