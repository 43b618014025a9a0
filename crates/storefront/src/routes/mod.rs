//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /           - Product listing (session-gated)
//! GET  /sign-in    - Sign-in page (public)
//! POST /sign-in    - Sign-in action
//! GET  /sign-up    - Sign-up page (public)
//! POST /sign-up    - Sign-up action
//! POST /logout     - Logout action
//! GET  /health     - Liveness check
//! GET  /static/*   - Static assets
//! ```
//!
//! The page routes (every GET above except `/health` and `/static`) sit
//! behind the redirect policy middleware, so the session gate is consulted
//! before any page handler runs. The auth actions are rate limited; the
//! logout action is neither gated nor limited.

pub mod auth;
pub mod listing;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::filters;
use crate::middleware;
use crate::state::AppState;

/// Create the page routes: everything the redirect policy governs.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(listing::index))
        .route("/sign-in", get(auth::sign_in_page))
        .route("/sign-up", get(auth::sign_up_page))
        .fallback(not_found)
        .layer(axum::middleware::from_fn(
            middleware::redirect_policy_middleware,
        ))
}

/// Create the auth action routes, rate limited per IP.
pub fn auth_action_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/sign-up", post(auth::sign_up))
        .layer(middleware::auth_rate_limiter())
}

/// Assemble the complete application router.
///
/// Everything except the Sentry layers, which the binary adds outermost so
/// tests can drive this router without a Sentry client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(page_routes())
        .merge(auth_action_routes())
        .route("/logout", post(auth::logout))
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog
/// source; a dead upstream degrades the listing page, not the process.
pub async fn health() -> &'static str {
    "ok"
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

/// Fallback for unknown paths.
///
/// Runs after the redirect policy, so an unauthenticated request to an
/// unknown path lands on the sign-in page instead of here.
pub async fn not_found() -> (StatusCode, NotFoundTemplate) {
    (StatusCode::NOT_FOUND, NotFoundTemplate)
}
