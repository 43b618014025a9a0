//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Mock credential check behind the session gate

pub mod auth;
