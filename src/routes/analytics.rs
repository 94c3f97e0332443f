/**
 * Analytics Routes
 * Page-view tracking middleware and the admin analytics views
 */
use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routes::auth::AdminSession;
use crate::state::AppState;
use crate::store::models::PageView;

const DEFAULT_TOP_LIMIT: usize = 5;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewsResponse {
    pub page_views: Vec<PageView>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPageViewsResponse {
    pub top_page_views: Vec<PageView>,
}

/// Raw so that junk like `?limit=abc` falls back instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<String>,
}

impl TopQuery {
    fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<usize>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_TOP_LIMIT)
    }
}

/// Paths that count as a page rather than an asset, probe or API call.
pub fn is_trackable_path(path: &str) -> bool {
    !(path == "/api"
        || path.contains("/api/")
        || path.ends_with(".js")
        || path.ends_with(".css")
        || path == "/health"
        || path.starts_with("/health/"))
}

/// Counts a page view for every trackable request before routing it.
pub async fn track_page_view(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if is_trackable_path(path) {
        match state.store.record_page_view(path).await {
            Some(view) => {
                tracing::debug!(path = %view.page_view, count = view.count, "Page view recorded")
            }
            None => tracing::debug!(path, "Page view table full, path not tracked"),
        }
    }
    next.run(request).await
}

/// GET /api/admin/analytics
pub async fn page_views(_session: AdminSession, State(state): State<AppState>) -> Json<PageViewsResponse> {
    Json(PageViewsResponse {
        page_views: state.store.page_views().await,
    })
}

/// GET /api/admin/analytics/top?limit=N
pub async fn top_page_views(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Json<TopPageViewsResponse> {
    Json(TopPageViewsResponse {
        top_page_views: state.store.top_page_views(query.limit()).await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trackable_paths() {
        assert!(is_trackable_path("/"));
        assert!(is_trackable_path("/about"));
        assert!(is_trackable_path("/admin"));
        assert!(!is_trackable_path("/api"));
        assert!(!is_trackable_path("/api/projects"));
        assert!(!is_trackable_path("/assets/index.js"));
        assert!(!is_trackable_path("/assets/site.css"));
        assert!(!is_trackable_path("/health"));
        assert!(!is_trackable_path("/health/ready"));
        assert!(is_trackable_path("/healthy-living"));
        assert!(is_trackable_path("/healthcare"));
    }

    #[test]
    fn test_top_limit_defaults() {
        let q = |limit: Option<&str>| TopQuery {
            limit: limit.map(str::to_string),
        };
        assert_eq!(q(None).limit(), 5);
        assert_eq!(q(Some("abc")).limit(), 5);
        assert_eq!(q(Some("0")).limit(), 5);
        assert_eq!(q(Some("-3")).limit(), 5);
        assert_eq!(q(Some("2")).limit(), 2);
    }
}
