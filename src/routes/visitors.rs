/**
 * Visitor Routes
 * Public visitor counter plus the admin dashboard counters
 */
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::routes::auth::AdminSession;
use crate::state::AppState;
use crate::store::StoreStats;

#[derive(Debug, Serialize, Deserialize)]
pub struct VisitorCountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetVisitorsResponse {
    pub message: String,
    pub count: u64,
}

/// GET /api/visitors
pub async fn get_visitor_count(State(state): State<AppState>) -> Json<VisitorCountResponse> {
    Json(VisitorCountResponse {
        count: state.store.visitor_count().await,
    })
}

/// POST /api/visitors/increment
pub async fn increment_visitor_count(State(state): State<AppState>) -> Json<VisitorCountResponse> {
    Json(VisitorCountResponse {
        count: state.store.increment_visitor_count().await,
    })
}

/// GET /api/admin/stats
pub async fn admin_stats(_session: AdminSession, State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.store.stats().await)
}

/// POST /api/admin/reset-visitors
pub async fn reset_visitors(
    session: AdminSession,
    State(state): State<AppState>,
) -> Json<ResetVisitorsResponse> {
    state.store.reset_visitor_count().await;
    tracing::info!(admin = %session.admin().username, "Visitor counter reset");
    Json(ResetVisitorsResponse {
        message: "Visitor count reset successfully".to_string(),
        count: 0,
    })
}
