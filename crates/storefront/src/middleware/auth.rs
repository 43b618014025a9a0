//! Session gate wiring: the store adapter, the signed-in-user extractor,
//! and the redirect policy middleware.
//!
//! The policy itself lives in `copper_fern_core::session::redirect` as a
//! pure function; this module only connects it to the request session.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use copper_fern_core::session::redirect::{SIGN_IN_ROUTE, decide_redirect};
use copper_fern_core::{SessionGate, SessionRecord, SessionStore};

/// [`SessionStore`] adapter over the request's tower-sessions session.
///
/// Each gate entry becomes one session value, so the stored shape matches
/// the three-string-keys contract exactly.
#[derive(Debug, Clone)]
pub struct SessionKv {
    session: Session,
}

impl SessionKv {
    /// Wrap a request session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl SessionStore for SessionKv {
    type Error = tower_sessions::session::Error;

    async fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.session.get::<String>(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.session.insert(key, value.to_owned()).await
    }

    async fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.session.remove::<String>(key).await?;
        Ok(())
    }
}

/// Restore the session gate for the current request.
///
/// Every consult of the gate goes through this one read path, so no page
/// handler sees session state the gate has not derived.
///
/// # Errors
///
/// Returns the session store's error if a read fails.
pub async fn session_gate(
    session: &Session,
) -> Result<SessionGate<SessionKv>, tower_sessions::session::Error> {
    SessionGate::restore(SessionKv::new(session.clone())).await
}

/// Extractor for the signed-in user.
///
/// The redirect policy middleware already keeps unauthenticated requests
/// off the gated pages; this extractor is the handler-level restatement of
/// that guarantee, and redirects rather than panicking if it is ever
/// reached without one.
pub struct CurrentUser(pub SessionRecord);

/// Rejection for [`CurrentUser`]: back to the sign-in page.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to(SIGN_IN_ROUTE).into_response()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts.extensions.get::<Session>().ok_or(AuthRejection)?;

        let gate = session_gate(session).await.map_err(|e| {
            tracing::error!(error = %e, "failed to restore session gate");
            AuthRejection
        })?;

        gate.user().cloned().map(Self).ok_or(AuthRejection)
    }
}

/// Redirect policy middleware for the page routes.
///
/// Consults the session gate and the pure redirect policy before any page
/// handler runs: unauthenticated requests to gated pages go to sign-in,
/// authenticated requests to the auth pages go home. A session read failure
/// is treated as unauthenticated, which errs toward the sign-in page.
pub async fn redirect_policy_middleware(request: Request, next: Next) -> Response {
    let is_authenticated = match request.extensions().get::<Session>() {
        Some(session) => match session_gate(session).await {
            Ok(gate) => gate.is_authenticated(),
            Err(e) => {
                tracing::error!(error = %e, "session read failed; treating as unauthenticated");
                false
            }
        },
        None => false,
    };

    if let Some(target) = decide_redirect(is_authenticated, request.uri().path()) {
        return Redirect::to(target).into_response();
    }

    next.run(request).await
}
