/**
 * Skill Routes
 * Public skill listing (optionally by category) and admin CRUD
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
use crate::store::models::{NewSkill, Skill, SkillPatch};

#[derive(Debug, Serialize, Deserialize)]
pub struct SkillsResponse {
    pub skills: Vec<Skill>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SkillResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub skill: Skill,
}

const NOT_FOUND: ApiError = ApiError::NotFound("Skill");

/// GET /api/skills
pub async fn list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: state.store.skills().await,
    })
}

/// GET /api/skills/category/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: state.store.skills_by_category(&category).await,
    })
}

/// GET /api/skills/{id}
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SkillResponse>> {
    let skill = state.store.skill(parse_id(&id, NOT_FOUND)?).await.ok_or(NOT_FOUND)?;
    Ok(Json(SkillResponse {
        message: None,
        skill,
    }))
}

/// POST /api/admin/skills
pub async fn create_skill(
    _session: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewSkill>,
) -> ApiResult<(StatusCode, Json<SkillResponse>)> {
    let skill = state.store.create_skill(payload).await;
    tracing::info!(id = skill.id, name = %skill.name, "Skill created");
    Ok((
        StatusCode::CREATED,
        Json(SkillResponse {
            message: Some("Skill created successfully".to_string()),
            skill,
        }),
    ))
}

/// PUT /api/admin/skills/{id}
pub async fn update_skill(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<SkillPatch>,
) -> ApiResult<Json<SkillResponse>> {
    let skill = state
        .store
        .update_skill(parse_id(&id, NOT_FOUND)?, patch)
        .await
        .ok_or(NOT_FOUND)?;
    Ok(Json(SkillResponse {
        message: Some("Skill updated successfully".to_string()),
        skill,
    }))
}

/// DELETE /api/admin/skills/{id}
pub async fn delete_skill(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, NOT_FOUND)?;
    if !state.store.delete_skill(id).await {
        return Err(NOT_FOUND);
    }
    tracing::info!(id, "Skill deleted");
    Ok(Json(MessageResponse::new("Skill deleted successfully")))
}
