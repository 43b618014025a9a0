//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format. Carries the parse failure for logs; the user
    /// sees a generic message.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] copper_fern_core::EmailError),

    /// Invalid credentials (the mock's only sign-in rejection).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Sign-up password confirmation did not match.
    #[error("passwords do not match")]
    PasswordMismatch,
}
