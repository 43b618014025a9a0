//! Copper Fern Core - Shared domain library.
//!
//! This crate provides the domain types and pure logic used by the Copper
//! Fern storefront:
//! - [`types`] - Newtype wrappers and the product record
//! - [`catalog`] - Filtering, sorting, and the sidebar panel model
//! - [`session`] - Session record, storage abstraction, and redirect policy
//!
//! # Architecture
//!
//! The core crate contains only types, traits, and pure functions - no I/O,
//! no HTTP clients, no template rendering. Everything here is testable
//! without a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod session;
pub mod types;

pub use catalog::{ActiveFilterSet, FilterId, FilterPanel, SortKey};
pub use session::{MemoryStore, SessionGate, SessionRecord, SessionStore};
pub use types::*;
