//! Portfolio CMS - library for app logic and testing

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceExt;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use config::AppConfig;
use logging::LogConfig;
use routes::MessageResponse;
use state::AppState;
use store::ContentStore;

/// CORS for the configured frontend origins. Credentials are allowed so the
/// session cookie travels with cross-origin admin requests.
pub fn configure_cors(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not Found"))).into_response()
}

/// Unknown API paths get a JSON 404; everything else is the SPA, if one is configured.
async fn fallback(State(state): State<AppState>, request: Request) -> Response {
    let path = request.uri().path();
    if path == "/api" || path.starts_with("/api/") {
        return not_found();
    }

    let Some(dir) = state.config.static_dir.as_ref() else {
        return not_found();
    };

    let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
    match spa.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

fn api_routes() -> Router<AppState> {
    use routes::{analytics, auth, contact, projects, settings, skills, social_links, visitors};

    Router::new()
        // Visitors
        .route("/api/visitors", get(visitors::get_visitor_count))
        .route("/api/visitors/increment", post(visitors::increment_visitor_count))
        // Session
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/admin/check", get(auth::check))
        // Dashboard
        .route("/api/admin/stats", get(visitors::admin_stats))
        .route("/api/admin/reset-visitors", post(visitors::reset_visitors))
        .route("/api/admin/analytics", get(analytics::page_views))
        .route("/api/admin/analytics/top", get(analytics::top_page_views))
        // Singletons
        .route("/api/website-settings", get(settings::get_website_settings))
        .route("/api/admin/website-settings", put(settings::update_website_settings))
        .route("/api/personal-info", get(settings::get_personal_info))
        .route("/api/admin/personal-info", put(settings::update_personal_info))
        // Social links
        .route("/api/social-links", get(social_links::list_links))
        .route("/api/social-links/{id}", get(social_links::get_link))
        .route("/api/admin/social-links", post(social_links::create_link))
        .route(
            "/api/admin/social-links/{id}",
            put(social_links::update_link).delete(social_links::delete_link),
        )
        // Projects
        .route("/api/projects", get(projects::list_projects))
        .route("/api/projects/featured", get(projects::list_featured))
        .route("/api/projects/{id}", get(projects::get_project))
        .route("/api/admin/projects", post(projects::create_project))
        .route(
            "/api/admin/projects/{id}",
            put(projects::update_project).delete(projects::delete_project),
        )
        // Skills
        .route("/api/skills", get(skills::list_skills))
        .route("/api/skills/category/{category}", get(skills::list_by_category))
        .route("/api/skills/{id}", get(skills::get_skill))
        .route("/api/admin/skills", post(skills::create_skill))
        .route(
            "/api/admin/skills/{id}",
            put(skills::update_skill).delete(skills::delete_skill),
        )
        // Contact
        .route("/api/contact", post(contact::submit_contact))
        .route("/api/admin/messages", get(contact::list_messages))
        .route("/api/admin/messages/{id}/read", put(contact::mark_read))
        .route("/api/admin/messages/{id}", delete(contact::delete_message))
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors(&state.config);
    let body_limit = state.config.body_limit_bytes;

    api_routes()
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/ready", get(routes::health::health_ready))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::analytics::track_page_view,
        ))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        // Compress responses with gzip/br/zstd automatically
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Run the server (used by main).
pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Guards MUST be held for the programme's lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered log lines.
    let _log_guards = logging::init(&LogConfig::from_env(config.environment));

    routes::health::init_start_time();

    if config.environment.is_production() && config.admin.uses_default_password() {
        tracing::warn!(
            "SECURITY: Neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD is set. \
             The fallback default password 'admin123' is insecure. \
             Set ADMIN_PASSWORD_HASH to a bcrypt hash of a strong password."
        );
    }

    let store = ContentStore::seeded(&config.admin, config.bcrypt_cost)
        .await
        .map_err(std::io::Error::other)?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid HOST/PORT configuration: {}", e),
            )
        })?;

    let sweep_period = std::time::Duration::from_secs(config.session_check_period_secs);
    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static frontend");
    }

    let state = AppState::new(store, config);
    let sweeper = session::spawn_sweeper(state.sessions.clone(), sweep_period);
    let app = create_app(state);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdminPassword, AdminSeed};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};

    const PASSWORD: &str = "test-password";

    async fn test_app() -> (Router, AppState) {
        let seed = AdminSeed {
            username: "akaanakbaik".to_string(),
            password: AdminPassword::Plain(PASSWORD.to_string()),
        };
        let store = ContentStore::seeded(&seed, 4).await.unwrap();
        let state = AppState::new(store, AppConfig::default());
        (create_app(state.clone()), state)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    fn json_request(method: Method, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn login(app: &Router) -> String {
        let req = json_request(
            Method::POST,
            "/api/admin/login",
            None,
            json!({ "username": "akaanakbaik", "password": PASSWORD }),
        );
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let set_cookie = res.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_seeded_settings_are_public() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, get_request("/api/website-settings", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settings"]["siteName"], "Aka's Portfolio");
        assert_eq!(body["settings"]["animationIntensity"], "medium");
    }

    #[tokio::test]
    async fn test_personal_info_update_round_trip() {
        let (app, _) = test_app().await;
        let cookie = login(&app).await;

        let (status, body) = send(
            &app,
            json_request(
                Method::PUT,
                "/api/admin/personal-info",
                Some(&cookie),
                json!({ "name": "New Name" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Personal info updated successfully");

        let (_, body) = send(&app, get_request("/api/personal-info", None)).await;
        assert_eq!(body["info"]["name"], "New Name");
        assert_eq!(body["info"]["title"], "Junior Developer");
    }

    #[tokio::test]
    async fn test_update_missing_project_is_404() {
        let (app, _) = test_app().await;
        let cookie = login(&app).await;
        let (status, body) = send(
            &app,
            json_request(
                Method::PUT,
                "/api/admin/projects/999",
                Some(&cookie),
                json!({ "title": "Ghost" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Project not found");
    }

    #[tokio::test]
    async fn test_unknown_animation_intensity_is_field_error() {
        let (app, state) = test_app().await;
        let cookie = login(&app).await;
        let (status, body) = send(
            &app,
            json_request(
                Method::PUT,
                "/api/admin/website-settings",
                Some(&cookie),
                json!({ "animationIntensity": "extreme" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid input");
        assert!(body["errors"]["animationIntensity"].is_array());

        let settings = state.store.website_settings().await;
        assert_eq!(settings.animation_intensity, store::models::AnimationIntensity::Medium);

        let (status, body) = send(
            &app,
            json_request(
                Method::PUT,
                "/api/admin/website-settings",
                Some(&cookie),
                json!({ "animationIntensity": "low" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settings"]["animationIntensity"], "low");
    }

    #[tokio::test]
    async fn test_ids_beyond_record_range_are_404() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, get_request("/api/projects/4294967296", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Project not found");

        let (status, _) = send(&app, get_request("/api/skills/18446744073709551616", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, get_request("/api/projects/12ab", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid id");
    }

    #[tokio::test]
    async fn test_skill_proficiency_out_of_range_is_400() {
        let (app, state) = test_app().await;
        let cookie = login(&app).await;
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/admin/skills",
                Some(&cookie),
                json!({ "name": "Go", "proficiency": 150 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid input");
        assert!(body["errors"]["proficiency"].is_array());
        assert_eq!(state.store.skills().await.len(), 3);
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() {
        let (app, _) = test_app().await;

        let (status, body) = send(&app, get_request("/api/admin/stats", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Unauthorized");

        // gate runs before the body is parsed
        let req = Request::post("/api/admin/projects")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (app, _) = test_app().await;
        let cookie = login(&app).await;
        let req = Request::post("/api/admin/projects")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, &cookie)
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_bad_path_id_is_400() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, get_request("/api/projects/abc", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid id");
    }

    #[tokio::test]
    async fn test_project_crud_flow() {
        let (app, _) = test_app().await;
        let cookie = login(&app).await;

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/admin/projects",
                Some(&cookie),
                json!({ "title": "CLI", "description": "A tool", "featured": true, "displayOrder": 0 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Project created successfully");
        let id = body["project"]["id"].as_u64().unwrap();

        let (_, body) = send(&app, get_request("/api/projects/featured", None)).await;
        let titles: Vec<_> = body["projects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, ["CLI", "Personal Portfolio"]);

        let uri = format!("/api/admin/projects/{}", id);
        let req = Request::delete(uri.as_str())
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Project deleted successfully");

        let (status, _) = send(&app, get_request(&format!("/api/projects/{}", id), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_skills_by_category() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, get_request("/api/skills/category/frontend", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"].as_array().unwrap().len(), 3);

        let (_, body) = send(&app, get_request("/api/skills/category/backend", None)).await;
        assert!(body["skills"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_visitor_counter_and_stats() {
        let (app, _) = test_app().await;
        for _ in 0..3 {
            send(&app, json_request(Method::POST, "/api/visitors/increment", None, json!({}))).await;
        }
        let (_, body) = send(&app, get_request("/api/visitors", None)).await;
        assert_eq!(body["count"], 3);

        let cookie = login(&app).await;
        let (_, body) = send(&app, get_request("/api/admin/stats", Some(&cookie))).await;
        assert_eq!(body["visitorCount"], 3);

        let req = Request::post("/api/admin/reset-visitors")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_page_views_skip_api_and_assets() {
        let (app, state) = test_app().await;
        send(&app, get_request("/about", None)).await;
        send(&app, get_request("/about", None)).await;
        send(&app, get_request("/assets/app.js", None)).await;
        send(&app, get_request("/api/projects", None)).await;
        send(&app, get_request("/health", None)).await;
        send(&app, get_request("/health/ready", None)).await;
        send(&app, get_request("/healthy-living", None)).await;

        let views = state.store.page_views().await;
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].page_view, "/about");
        assert_eq!(views[0].count, 2);
        assert_eq!(views[1].page_view, "/healthy-living");

        let cookie = login(&app).await;
        let (_, body) = send(&app, get_request("/api/admin/analytics/top?limit=abc", Some(&cookie))).await;
        assert_eq!(body["topPageViews"][0]["pageView"], "/about");
    }

    #[tokio::test]
    async fn test_contact_and_inbox() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/contact",
                None,
                json!({
                    "name": "Visitor",
                    "email": "visitor@example.com",
                    "subject": "Hello",
                    "message": "Nice site"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let cookie = login(&app).await;
        let (_, body) = send(&app, get_request("/api/admin/messages", Some(&cookie))).await;
        let id = body["messages"][0]["id"].as_u64().unwrap();
        assert_eq!(body["messages"][0]["read"], false);

        let req = Request::put(format!("/api/admin/messages/{}/read", id).as_str())
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contactMessage"]["read"], true);

        let (_, body) = send(&app, get_request("/api/admin/stats", Some(&cookie))).await;
        assert_eq!(body["messageCount"], 1);
        assert_eq!(body["unreadMessageCount"], 0);
    }

    #[tokio::test]
    async fn test_invalid_contact_email_is_400() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/contact",
                None,
                json!({ "name": "V", "email": "nope", "subject": "Hi", "message": "Hello" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["email"].is_array());
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_404() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, get_request("/api/nope", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not Found");

        let (status, _) = send(&app, get_request("/some/page", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_check_reports_session_state() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, get_request("/api/admin/check", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticated"], false);

        let cookie = login(&app).await;
        let (_, body) = send(&app, get_request("/api/admin/check", Some(&cookie))).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["admin"]["username"], "akaanakbaik");
    }
}
