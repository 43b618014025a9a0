//! Integration test harness for Copper Fern.
//!
//! Tests drive the full storefront router in process with
//! `tower::ServiceExt::oneshot`, so every request passes through the real
//! middleware stack (sessions, redirect policy, rate limiting, security
//! headers) without binding a port. The catalog source is the only
//! external piece; catalog tests stand up a local stub server for it.
//!
//! Run with: `cargo test -p copper-fern-integration-tests`

// Test harness: panicking on malformed fixtures is the correct failure mode.
#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use copper_fern_storefront::config::StorefrontConfig;
use copper_fern_storefront::routes;
use copper_fern_storefront::state::AppState;

/// Configuration for in-process tests: instant sign-in, no Sentry.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        login_delay_ms: 0,
        ..StorefrontConfig::default()
    }
}

/// An in-process storefront instance.
///
/// Cloning the router per request keeps the underlying state (session
/// store, catalog cache, rate limiter) shared across the test, matching
/// how one running server treats a sequence of requests.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Storefront with the default test configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Storefront with an overridden configuration.
    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        Self {
            router: routes::app(AppState::new(config)),
        }
    }

    /// Drive one request through the full router.
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// GET a path, optionally carrying a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).expect("request")).await
    }

    /// POST a urlencoded form.
    ///
    /// Carries a client IP header so the rate limiter has a key; oneshot
    /// requests have no peer address for it to fall back on.
    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("x-real-ip", "127.0.0.1");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body.to_owned())).expect("request"))
            .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the `name=value` pair of the session cookie set by a response.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let raw = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(str::to_owned)
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response carries a Location header")
        .to_str()
        .expect("Location is valid UTF-8")
}

/// Collect a response body into a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

/// Sign in with the given email and return the session cookie.
pub async fn sign_in(app: &TestApp, email: &str) -> String {
    let body = format!(
        "email={}&password=secret",
        email.replace('@', "%40")
    );
    let response = app.post_form("/sign-in", &body, None).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::SEE_OTHER,
        "sign-in must redirect"
    );
    session_cookie(&response).expect("sign-in sets a session cookie")
}
