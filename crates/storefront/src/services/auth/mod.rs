//! Authentication service.
//!
//! This is deliberately a mock: there is no account store and no real
//! credential verification. The service simulates the network round-trip
//! with a fixed delay and derives the display name from the email local
//! part. It is still modeled as fallible so the handler contract stays
//! realistic: a syntactically invalid email or an empty password is
//! rejected, anything else signs in.
//!
//! Duplicate concurrent submissions are allowed; each runs the full delay
//! and the last session write wins. There is no in-flight lock.

mod error;

pub use error::AuthError;

use std::time::Duration;

use tracing::{info, instrument};

use copper_fern_core::{Email, SessionRecord};

/// Authentication service.
#[derive(Debug, Clone)]
pub struct AuthService {
    delay: Duration,
}

impl AuthService {
    /// Create a service with the given simulated round-trip delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    // =========================================================================
    // Sign In
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// The password is never checked beyond being non-empty; this stands in
    /// for a credential backend that does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email does not parse
    /// or the password is empty.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionRecord, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        self.simulate_round_trip().await;

        info!(email = %email, "sign-in accepted");
        Ok(SessionRecord::new(email, None))
    }

    // =========================================================================
    // Sign Up
    // =========================================================================

    /// Sign up with an optional display name, email, and password pair.
    ///
    /// There is no persistent account record; a successful sign-up simply
    /// establishes the same session a sign-in would.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs,
    /// `AuthError::InvalidEmail` if the email does not parse, and
    /// `AuthError::InvalidCredentials` if the password is empty.
    #[instrument(skip(self, password, password_confirm))]
    pub async fn sign_up(
        &self,
        name: Option<&str>,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<SessionRecord, AuthError> {
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        self.simulate_round_trip().await;

        info!(email = %email, "sign-up accepted");
        Ok(SessionRecord::new(email, name.map(str::to_owned)))
    }

    /// The fixed delay standing in for the auth backend's latency.
    async fn simulate_round_trip(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        // No delay in tests; the delay is configuration, not logic.
        AuthService::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_sign_in_derives_display_name_from_local_part() {
        let record = service().sign_in("a@b.com", "x").await.unwrap();
        assert_eq!(record.email().as_str(), "a@b.com");
        assert_eq!(record.display_name(), "a");
    }

    #[tokio::test]
    async fn test_sign_in_rejects_unparseable_email() {
        let err = service().sign_in("not-an-email", "x").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_sign_in_rejects_empty_password() {
        let err = service().sign_in("a@b.com", "").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_sign_in_never_validates_the_password_content() {
        // Any non-empty password is accepted; this is the documented stub.
        assert!(service().sign_in("a@b.com", "wrong").await.is_ok());
        assert!(service().sign_in("a@b.com", "also wrong").await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_up_prefers_explicit_name() {
        let record = service()
            .sign_up(Some("Jane"), "jane@shop.test", "pw", "pw")
            .await
            .unwrap();
        assert_eq!(record.display_name(), "Jane");
    }

    #[tokio::test]
    async fn test_sign_up_without_name_falls_back_to_local_part() {
        let record = service()
            .sign_up(None, "jane@shop.test", "pw", "pw")
            .await
            .unwrap();
        assert_eq!(record.display_name(), "jane");
    }

    #[tokio::test]
    async fn test_sign_up_rejects_mismatched_confirmation() {
        let err = service()
            .sign_up(None, "a@b.com", "pw", "different")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_invalid_email() {
        let err = service()
            .sign_up(None, "nope", "pw", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }
}
