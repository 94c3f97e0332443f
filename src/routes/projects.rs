/**
 * Project Routes
 * Public project showcase and admin CRUD
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
use crate::store::models::{NewProject, Project, ProjectPatch};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub project: Project,
}

const NOT_FOUND: ApiError = ApiError::NotFound("Project");

// ============================================================================
// Public
// ============================================================================

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> Json<ProjectsResponse> {
    Json(ProjectsResponse {
        projects: state.store.projects().await,
    })
}

/// GET /api/projects/featured
pub async fn list_featured(State(state): State<AppState>) -> Json<ProjectsResponse> {
    Json(ProjectsResponse {
        projects: state.store.featured_projects().await,
    })
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state.store.project(parse_id(&id, NOT_FOUND)?).await.ok_or(NOT_FOUND)?;
    Ok(Json(ProjectResponse {
        message: None,
        project,
    }))
}

// ============================================================================
// Admin
// ============================================================================

/// POST /api/admin/projects
pub async fn create_project(
    _session: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewProject>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let project = state.store.create_project(payload).await;
    tracing::info!(id = project.id, title = %project.title, "Project created");
    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            message: Some("Project created successfully".to_string()),
            project,
        }),
    ))
}

/// PUT /api/admin/projects/{id}
pub async fn update_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<ProjectPatch>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state
        .store
        .update_project(parse_id(&id, NOT_FOUND)?, patch)
        .await
        .ok_or(NOT_FOUND)?;
    tracing::info!(id = project.id, "Project updated");
    Ok(Json(ProjectResponse {
        message: Some("Project updated successfully".to_string()),
        project,
    }))
}

/// DELETE /api/admin/projects/{id}
pub async fn delete_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, NOT_FOUND)?;
    if !state.store.delete_project(id).await {
        return Err(NOT_FOUND);
    }
    tracing::info!(id, "Project deleted");
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
