//! Authentication route handlers.
//!
//! Sign-in, sign-up, and logout against the mock auth service. Failures
//! render inline on the form rather than bouncing through an error query
//! parameter, matching the page's single-submit flow.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use copper_fern_core::session::redirect::{HOME_ROUTE, SIGN_IN_ROUTE};

use crate::error::Result as AppResult;
use crate::filters;
use crate::middleware::session_gate;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Inline message for a rejected sign-in. The cause is deliberately not
/// distinguished.
pub const SIGN_IN_ERROR: &str = "Invalid email or password. Please try again.";

// =============================================================================
// Form Types
// =============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Sign-up form data.
#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/sign_in.html")]
pub struct SignInTemplate {
    pub error: Option<&'static str>,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/sign_up.html")]
pub struct SignUpTemplate {
    pub error: Option<&'static str>,
}

// =============================================================================
// Sign In
// =============================================================================

/// Display the sign-in page.
pub async fn sign_in_page() -> SignInTemplate {
    SignInTemplate { error: None }
}

/// Handle sign-in form submission.
///
/// On success the session gate persists the record and the user lands on
/// the listing; on rejection the form is re-shown with an inline message.
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> AppResult<Response> {
    match state.auth().sign_in(&form.email, &form.password).await {
        Ok(record) => {
            let mut gate = session_gate(&session).await?;
            gate.login(record).await?;
            Ok(Redirect::to(HOME_ROUTE).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("sign-in rejected");
            Ok(SignInTemplate {
                error: Some(SIGN_IN_ERROR),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Sign Up
// =============================================================================

/// Display the sign-up page.
pub async fn sign_up_page() -> SignUpTemplate {
    SignUpTemplate { error: None }
}

/// Handle sign-up form submission.
///
/// A successful sign-up establishes the session directly; there is no
/// account record and no activation step.
pub async fn sign_up(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignUpForm>,
) -> AppResult<Response> {
    let name = form.name.as_deref().filter(|name| !name.is_empty());
    match state
        .auth()
        .sign_up(name, &form.email, &form.password, &form.password_confirm)
        .await
    {
        Ok(record) => {
            let mut gate = session_gate(&session).await?;
            gate.login(record).await?;
            Ok(Redirect::to(HOME_ROUTE).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "sign-up rejected");
            let message = match e {
                AuthError::PasswordMismatch => "Passwords do not match.",
                AuthError::InvalidEmail(_) => "Enter a valid email address.",
                AuthError::InvalidCredentials => "Enter a password.",
            };
            Ok(SignUpTemplate {
                error: Some(message),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Removes the three gate entries and returns to the sign-in page.
/// Idempotent: logging out of a signed-out session is a no-op that lands
/// in the same place.
pub async fn logout(session: Session) -> AppResult<Response> {
    let mut gate = session_gate(&session).await?;
    gate.logout().await?;
    Ok(Redirect::to(SIGN_IN_ROUTE).into_response())
}
