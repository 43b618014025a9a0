//! Core types for Copper Fern.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod product;

pub use email::{Email, EmailError};
pub use id::*;
pub use product::{Product, Rating};
