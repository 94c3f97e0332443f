/**
 * Authentication Routes
 * Cookie-backed admin sessions with login, logout, and check
 */
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::routes::extract::ValidatedJson;
use crate::routes::MessageResponse;
use crate::session::SessionData;
use crate::state::AppState;
use crate::store::models::{AdminSummary, Credentials};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "portfolio.sid";

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub admin: AdminSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminSummary>,
}

/// Proof of a live admin session. Add it to a handler's arguments to gate it;
/// requests without one are rejected with 401 before the body is read.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub session_id: String,
    pub data: SessionData,
}

impl AdminSession {
    pub fn admin(&self) -> &AdminSummary {
        &self.data.admin
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        current_session(&jar, state)
            .await?
            .ok_or(ApiError::Unauthorized)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Session named by the request cookie, if it is still live.
pub async fn current_session(
    jar: &CookieJar,
    state: &AppState,
) -> ApiResult<Option<AdminSession>> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    let session_id = cookie.value().to_string();
    let data = state.sessions.get(&session_id).await?;
    Ok(data.map(|data| AdminSession { session_id, data }))
}

fn session_cookie(session_id: String, config: &AppConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(config.session_ttl().num_seconds()))
        .secure(config.cookie_secure())
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/admin/login
/// Verify credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let Some(admin) = state.store.validate_admin(&credentials).await? else {
        tracing::warn!(username = %credentials.username, "Failed admin login attempt");
        return Err(ApiError::InvalidCredentials);
    };

    // Never let a pre-login session id carry over
    if let Some(previous) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(previous.value()).await?;
    }

    let session_id = state.sessions.create(admin.clone()).await?;
    tracing::info!(username = %admin.username, "Admin logged in");

    let jar = jar.add(session_cookie(session_id, &state.config));
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            admin,
        }),
    ))
}

/// POST /api/admin/logout
/// Destroy the session (if any) and clear the cookie
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.sessions.destroy(cookie.value()).await? {
            tracing::info!("Admin logged out");
        }
    }

    Ok((
        jar.remove(removal_cookie()),
        Json(MessageResponse::new("Logout successful")),
    ))
}

/// GET /api/admin/check
pub async fn check(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Json<CheckResponse>> {
    let session = current_session(&jar, &state).await?;
    Ok(Json(CheckResponse {
        authenticated: session.is_some(),
        admin: session.map(|s| s.data.admin),
    }))
}
