/**
 * Site Settings Routes
 * Singleton website settings and personal info
 */
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::routes::auth::AdminSession;
use crate::routes::extract::ValidatedJson;
use crate::state::AppState;
use crate::store::models::{PersonalInfo, PersonalInfoPatch, WebsiteSettings, WebsiteSettingsPatch};

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub settings: WebsiteSettings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PersonalInfoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub info: PersonalInfo,
}

// ============================================================================
// Website settings
// ============================================================================

/// GET /api/website-settings
pub async fn get_website_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        message: None,
        settings: state.store.website_settings().await,
    })
}

/// PUT /api/admin/website-settings
pub async fn update_website_settings(
    session: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(patch): ValidatedJson<WebsiteSettingsPatch>,
) -> ApiResult<Json<SettingsResponse>> {
    let settings = state.store.update_website_settings(patch).await;
    tracing::info!(admin = %session.admin().username, "Website settings updated");
    Ok(Json(SettingsResponse {
        message: Some("Website settings updated successfully".to_string()),
        settings,
    }))
}

// ============================================================================
// Personal info
// ============================================================================

/// GET /api/personal-info
pub async fn get_personal_info(State(state): State<AppState>) -> Json<PersonalInfoResponse> {
    Json(PersonalInfoResponse {
        message: None,
        info: state.store.personal_info().await,
    })
}

/// PUT /api/admin/personal-info
pub async fn update_personal_info(
    session: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(patch): ValidatedJson<PersonalInfoPatch>,
) -> ApiResult<Json<PersonalInfoResponse>> {
    let info = state.store.update_personal_info(patch).await;
    tracing::info!(admin = %session.admin().username, "Personal info updated");
    Ok(Json(PersonalInfoResponse {
        message: Some("Personal info updated successfully".to_string()),
        info,
    }))
}
