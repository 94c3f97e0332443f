/**
 * Social Link Routes
 * Public listing and admin CRUD for social profile links
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::routes::auth::AdminSession;
use crate::routes::extract::{parse_id, ValidatedJson};
use crate::routes::MessageResponse;
use crate::state::AppState;
use crate::store::models::{NewSocialLink, SocialLink, SocialLinkPatch};

#[derive(Debug, Serialize, Deserialize)]
pub struct LinksResponse {
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub link: SocialLink,
}

const NOT_FOUND: ApiError = ApiError::NotFound("Social link");

/// GET /api/social-links
pub async fn list_links(State(state): State<AppState>) -> Json<LinksResponse> {
    Json(LinksResponse {
        links: state.store.social_links().await,
    })
}

/// GET /api/social-links/{id}
pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<LinkResponse>> {
    let link = state.store.social_link(parse_id(&id, NOT_FOUND)?).await.ok_or(NOT_FOUND)?;
    Ok(Json(LinkResponse {
        message: None,
        link,
    }))
}

/// POST /api/admin/social-links
pub async fn create_link(
    _session: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewSocialLink>,
) -> ApiResult<(StatusCode, Json<LinkResponse>)> {
    let link = state.store.create_social_link(payload).await;
    tracing::info!(id = link.id, platform = %link.platform, "Social link created");
    Ok((
        StatusCode::CREATED,
        Json(LinkResponse {
            message: Some("Social link created successfully".to_string()),
            link,
        }),
    ))
}

/// PUT /api/admin/social-links/{id}
pub async fn update_link(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<SocialLinkPatch>,
) -> ApiResult<Json<LinkResponse>> {
    let link = state
        .store
        .update_social_link(parse_id(&id, NOT_FOUND)?, patch)
        .await
        .ok_or(NOT_FOUND)?;
    Ok(Json(LinkResponse {
        message: Some("Social link updated successfully".to_string()),
        link,
    }))
}

/// DELETE /api/admin/social-links/{id}
pub async fn delete_link(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, NOT_FOUND)?;
    if !state.store.delete_social_link(id).await {
        return Err(NOT_FOUND);
    }
    tracing::info!(id, "Social link deleted");
    Ok(Json(MessageResponse::new("Social link deleted successfully")))
}
